//! Parser module for pomgraph.
//!
//! This module turns raw text into the data the graph is built from.
//!
//! # Supported Formats
//!
//! - **POM** (Maven manifest) - declared `<dependency>` elements
//! - **Flat description** - `parent -> child, child` lines for offline graphs
//!
//! # Example
//!
//! ```
//! use pomgraph::parser::pom;
//!
//! let xml = "<project><dependencies><dependency>\
//!     <groupId>org.slf4j</groupId><artifactId>slf4j-api</artifactId><version>2.0.9</version>\
//!     </dependency></dependencies></project>";
//!
//! let ids = pom::dependency_ids(xml).unwrap();
//! assert_eq!(ids, vec!["org.slf4j:slf4j-api:2.0.9".to_string()]);
//! ```

pub mod flat;
pub mod pom;
pub mod types;

// Re-export commonly used types for convenience
pub use flat::{FlatEntry, FLAT_VERSION};
pub use pom::{dependency_ids, extract_dependencies, ParseError, ParseResult};

pub use types::{Coordinate, PomDependency, Scope};

//! Manifest resolution.
//!
//! A [`DependencyResolver`] answers one question for the graph builder:
//! which coordinates does this package declare as direct dependencies?
//! [`HttpResolver`] answers it by downloading the package's POM from a
//! Maven-layout repository.

mod http;

pub use http::{HttpResolver, ResolveError, ResolverConfig, DEFAULT_TIMEOUT};

use crate::parser::Coordinate;

/// Extension of manifest files in a Maven-layout repository.
pub const MANIFEST_EXTENSION: &str = "pom";

/// Source of direct dependencies for a coordinate.
///
/// Implementations never fail: a package that cannot be resolved simply has
/// no dependencies, so one bad package cannot abort a graph build. Returned
/// strings are `group:artifact:version` identities in declaration order.
pub trait DependencyResolver {
    fn resolve(&self, coordinate: &Coordinate, repository: &str) -> Vec<String>;
}

impl<F> DependencyResolver for F
where
    F: Fn(&Coordinate, &str) -> Vec<String>,
{
    fn resolve(&self, coordinate: &Coordinate, repository: &str) -> Vec<String> {
        self(coordinate, repository)
    }
}

/// Builds the manifest URL for a coordinate.
///
/// `<repository>/<group path>/<artifact>/<version>/<artifact>-<version>.pom`,
/// where the group path is the group with `.` replaced by `/`. Exactly one
/// `/` separates the repository base from the path.
///
/// # Example
///
/// ```
/// use pomgraph::parser::Coordinate;
/// use pomgraph::resolver::pom_url;
///
/// let coord = Coordinate::new("org.apache.commons", "commons-lang3", "3.12.0");
/// assert_eq!(
///     pom_url(&coord, "https://repo1.maven.org/maven2/"),
///     "https://repo1.maven.org/maven2/org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.pom"
/// );
/// ```
pub fn pom_url(coordinate: &Coordinate, repository: &str) -> String {
    let base = repository.trim_end_matches('/');
    let group_path = coordinate.group.replace('.', "/");
    format!(
        "{base}/{group_path}/{artifact}/{version}/{artifact}-{version}.{MANIFEST_EXTENSION}",
        artifact = coordinate.artifact,
        version = coordinate.version,
    )
}

//! Shared types for manifest parsing.
//!
//! This module defines the core data structures used to identify packages
//! in a Maven-style repository and to describe the dependencies a POM
//! declares.

use serde::Serialize;
use std::fmt;

/// Separator between the parts of a coordinate identity string.
pub const COORDINATE_SEPARATOR: char = ':';

/// Identifies one package in the repository.
///
/// Two coordinates are equal iff their identity strings
/// (`group:artifact:version`) are equal.
///
/// # Example
///
/// ```
/// use pomgraph::parser::Coordinate;
///
/// let coord = Coordinate::new("org.slf4j", "slf4j-api", "2.0.9");
/// assert_eq!(coord.id(), "org.slf4j:slf4j-api:2.0.9");
/// assert_eq!(Coordinate::parse("org.slf4j:slf4j-api:2.0.9"), Some(coord));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    /// Dot-separated group identifier (e.g., "org.apache.commons").
    pub group: String,

    /// Artifact identifier (e.g., "commons-lang3").
    pub artifact: String,

    /// Literal version string (e.g., "3.12.0").
    pub version: String,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Parses a `group:artifact:version` string.
    ///
    /// Anything after the third part is ignored. Returns `None` when fewer
    /// than three parts are present or any of the three is empty.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(COORDINATE_SEPARATOR);
        let group = parts.next()?.trim();
        let artifact = parts.next()?.trim();
        let version = parts.next()?.trim();

        if group.is_empty() || artifact.is_empty() || version.is_empty() {
            return None;
        }

        Some(Self::new(group, artifact, version))
    }

    /// Returns the canonical identity string.
    pub fn id(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.group,
            self.artifact,
            self.version,
            sep = COORDINATE_SEPARATOR
        )
    }

    /// Returns true if the version is an unexpanded property such as
    /// `${project.version}`.
    pub fn has_placeholder_version(&self) -> bool {
        is_placeholder(&self.version)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Returns true if a version string carries a property placeholder.
pub fn is_placeholder(version: &str) -> bool {
    version.contains('$')
}

/// The `<scope>` of a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Compile,
    Provided,
    Runtime,
    /// Only needed to compile and run the package's own tests.
    Test,
    System,
    Import,
    /// Anything Maven does not define; kept verbatim.
    Other(String),
}

impl Scope {
    /// Maps scope text to a variant. Matching is exact: `"Test"` is not
    /// the test scope.
    pub fn from_text(text: &str) -> Self {
        match text {
            "compile" => Scope::Compile,
            "provided" => Scope::Provided,
            "runtime" => Scope::Runtime,
            "test" => Scope::Test,
            "system" => Scope::System,
            "import" => Scope::Import,
            other => Scope::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
            Scope::Other(s) => s.as_str(),
        };
        write!(f, "{}", s)
    }
}

/// One `<dependency>` element as it appears in a POM.
///
/// Every field is optional: an absent child element is recorded as `None`,
/// never as an error. Present values are whitespace-trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomDependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
}

impl PomDependency {
    /// Creates a fully specified dependency element.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: Some(artifact_id.into()),
            version: Some(version.into()),
            scope: None,
        }
    }

    /// Sets the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns the parsed scope, if one was declared.
    pub fn scope(&self) -> Option<Scope> {
        self.scope.as_deref().map(Scope::from_text)
    }

    /// Returns true if the scope text is exactly `test`.
    pub fn is_test_scoped(&self) -> bool {
        self.scope() == Some(Scope::Test)
    }

    /// Returns true if the version can be used literally: present,
    /// non-blank and free of placeholders.
    pub fn has_literal_version(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|v| !v.is_empty() && !is_placeholder(v))
    }

    /// Returns true if this element should become a graph edge.
    pub fn is_resolvable(&self) -> bool {
        !self.is_test_scoped() && self.has_literal_version() && self.coordinate().is_some()
    }

    /// Builds the coordinate, or `None` if any part is missing or blank.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let group = self.group_id.as_deref().filter(|s| !s.is_empty())?;
        let artifact = self.artifact_id.as_deref().filter(|s| !s.is_empty())?;
        let version = self.version.as_deref().filter(|s| !s.is_empty())?;
        Some(Coordinate::new(group, artifact, version))
    }
}

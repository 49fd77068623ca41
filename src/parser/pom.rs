//! Parser for Maven POM manifests.
//!
//! This module streams a POM document with `quick-xml` and extracts every
//! declared `<dependency>` element, then applies the literal-resolution
//! filter that decides which of them become graph edges.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::trace;

use super::types::{Coordinate, PomDependency};

/// Errors that can occur while parsing a POM document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document is not well-formed XML.
    #[error("Failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended while elements were still open.
    #[error("Unexpected end of document: {open} element(s) left open")]
    Truncated { open: usize },

    /// The document contains no root element.
    #[error("Manifest is empty")]
    Empty,
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

const DEPENDENCY_TAG: &[u8] = b"dependency";

/// Child elements of `<dependency>` that are captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    GroupId,
    ArtifactId,
    Version,
    Scope,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"groupId" => Some(Field::GroupId),
            b"artifactId" => Some(Field::ArtifactId),
            b"version" => Some(Field::Version),
            b"scope" => Some(Field::Scope),
            _ => None,
        }
    }

    fn slot(self, dep: &mut PomDependency) -> &mut Option<String> {
        match self {
            Field::GroupId => &mut dep.group_id,
            Field::ArtifactId => &mut dep.artifact_id,
            Field::Version => &mut dep.version,
            Field::Scope => &mut dep.scope,
        }
    }
}

/// A `<dependency>` element that has been opened but not yet closed.
struct OpenDependency {
    depth: usize,
    index: usize,
}

/// Text being collected for a child field of the innermost open dependency.
struct Capture {
    field: Field,
    index: usize,
    depth: usize,
    text: String,
}

/// Parses a POM document and returns every `<dependency>` element.
///
/// Elements are matched by local name at any nesting depth, so entries under
/// `<dependencyManagement>` and plugin declarations are included. Results are
/// in document order. Field values come from direct children only; when a
/// child is repeated the first one wins.
///
/// # Example
///
/// ```
/// use pomgraph::parser::pom::parse_str;
///
/// let pom = r#"<project>
///   <dependencies>
///     <dependency>
///       <groupId>junit</groupId>
///       <artifactId>junit</artifactId>
///       <version>4.13.2</version>
///       <scope>test</scope>
///     </dependency>
///   </dependencies>
/// </project>"#;
///
/// let deps = parse_str(pom).unwrap();
/// assert_eq!(deps.len(), 1);
/// assert!(deps[0].is_test_scoped());
/// ```
pub fn parse_str(content: &str) -> ParseResult<Vec<PomDependency>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut deps: Vec<PomDependency> = Vec::new();
    let mut open: Vec<OpenDependency> = Vec::new();
    let mut capture: Option<Capture> = None;
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                saw_root = true;
                depth += 1;
                if let Some(c) = open_element(&e, depth, &mut deps, &mut open) {
                    capture = capture.or(Some(c));
                }
            }
            Event::Empty(e) => {
                saw_root = true;
                // An empty child still counts as present, with blank text.
                if let Some(c) = open_element(&e, depth + 1, &mut deps, &mut open) {
                    *c.field.slot(&mut deps[c.index]) = Some(String::new());
                }
                if open.last().is_some_and(|d| d.depth == depth + 1) {
                    open.pop();
                }
            }
            Event::Text(e) => {
                if let Some(c) = capture.as_mut() {
                    c.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(c) = capture.as_mut() {
                    c.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                if capture.as_ref().is_some_and(|c| c.depth == depth) {
                    if let Some(c) = capture.take() {
                        *c.field.slot(&mut deps[c.index]) = Some(c.text.trim().to_string());
                    }
                }
                if open.last().is_some_and(|d| d.depth == depth) {
                    if let Some(d) = open.pop() {
                        trace!("Found dependency: {:?}", deps[d.index]);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ParseError::Empty);
    }
    if depth > 0 {
        return Err(ParseError::Truncated { open: depth });
    }

    Ok(deps)
}

/// Registers an element opened at `depth`.
///
/// Returns a capture when the element is a field of the innermost open
/// dependency that has not been filled yet.
fn open_element(
    e: &BytesStart<'_>,
    depth: usize,
    deps: &mut Vec<PomDependency>,
    open: &mut Vec<OpenDependency>,
) -> Option<Capture> {
    let name = e.local_name();
    let tag = name.as_ref();

    if tag == DEPENDENCY_TAG {
        deps.push(PomDependency::default());
        open.push(OpenDependency {
            depth,
            index: deps.len() - 1,
        });
        return None;
    }

    let parent = open.last()?;
    if depth != parent.depth + 1 {
        return None;
    }

    let field = Field::from_tag(tag)?;
    if field.slot(&mut deps[parent.index]).is_some() {
        return None;
    }

    Some(Capture {
        field,
        index: parent.index,
        depth,
        text: String::new(),
    })
}

/// Filters parsed elements down to literally resolvable coordinates.
///
/// Drops test-scoped entries, entries whose version is absent, blank or a
/// `$` placeholder, and entries missing a group or artifact. Order and
/// duplicates are preserved.
pub fn extract_dependencies(deps: &[PomDependency]) -> Vec<Coordinate> {
    deps.iter()
        .filter(|d| {
            let keep = d.is_resolvable();
            if !keep {
                trace!("Skipping dependency: {:?}", d);
            }
            keep
        })
        .filter_map(PomDependency::coordinate)
        .collect()
}

/// Parses a POM and returns the identity strings of its resolvable
/// dependencies.
pub fn dependency_ids(content: &str) -> ParseResult<Vec<String>> {
    let deps = parse_str(content)?;
    Ok(extract_dependencies(&deps)
        .iter()
        .map(Coordinate::id)
        .collect())
}

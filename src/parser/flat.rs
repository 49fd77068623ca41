//! Parser for flat, line-oriented graph descriptions.
//!
//! Used to describe dependency graphs offline, without a repository:
//!
//! ```text
//! # comment lines are ignored
//! app -> lib1, lib2
//! lib1 -> lib2
//! lib2 ->
//! ```
//!
//! Each token stands for the coordinate `token:token:1.0`.

use super::types::Coordinate;

/// Version given to every coordinate read from a flat description.
pub const FLAT_VERSION: &str = "1.0";

const ARROW: &str = "->";
const COMMENT_PREFIX: char = '#';

/// One `parent -> child, child` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub parent: String,
    pub children: Vec<String>,
}

impl FlatEntry {
    /// Returns the coordinate the parent token stands for.
    pub fn parent_coordinate(&self) -> Coordinate {
        token_coordinate(&self.parent)
    }

    /// Returns the coordinates of the children, in line order.
    pub fn child_coordinates(&self) -> Vec<Coordinate> {
        self.children.iter().map(|c| token_coordinate(c)).collect()
    }
}

/// Maps a token to the coordinate `token:token:1.0`.
pub fn token_coordinate(token: &str) -> Coordinate {
    Coordinate::new(token, token, FLAT_VERSION)
}

/// Parses a single line, returning `None` for blank, comment and malformed
/// lines.
///
/// A line is malformed unless it contains exactly one `->` and a non-empty
/// parent token.
pub fn parse_line(line: &str) -> Option<FlatEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return None;
    }

    let mut parts = line.split(ARROW);
    let parent = parts.next()?.trim();
    let children = parts.next()?.trim();
    if parts.next().is_some() || parent.is_empty() {
        return None;
    }

    let children = children
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    Some(FlatEntry {
        parent: parent.to_string(),
        children,
    })
}

/// Parses a whole description, skipping anything that is not a valid entry.
pub fn parse_str(content: &str) -> Vec<FlatEntry> {
    content.lines().filter_map(parse_line).collect()
}

//! pomgraph - transitive dependency graphs for Maven-layout repositories
//!
//! This crate resolves the direct dependencies declared in POM manifests,
//! follows them to a bounded depth, and reports the resulting graph along
//! with any dependency cycles. Graphs can also be loaded from a flat text
//! description for offline use.

pub mod config;
pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod resolver;

//! Graph module for dependency relationship modeling.
//!
//! This module provides the [`DependencyGraph`] struct, which builds a graph
//! of package coordinates either by resolving manifests or from a flat
//! description, and records the cycles it finds along the way.
//!
//! # Example
//!
//! ```rust
//! use pomgraph::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.build_from_flat_description("a -> b, c\nb -> c\n");
//!
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert!(!graph.has_cycles());
//! ```

mod dependency_graph;

pub use dependency_graph::{
    CycleInfo, DependencyGraph, DependencyNode, GraphError, CYCLE_LABEL, DEFAULT_MAX_DEPTH,
};

//! Dependency graph implementation using petgraph.
//!
//! Provides a directed graph of package coordinates, depth-bounded expansion
//! driven by a [`DependencyResolver`], and path-based cycle detection.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::parser::{flat, Coordinate};
use crate::resolver::DependencyResolver;

/// Default bound on traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Label that prefixes every cycle record.
pub const CYCLE_LABEL: &str = "Cycle";

const PATH_SEPARATOR: &str = " -> ";

/// Errors the graph reports to its caller.
///
/// Everything else (unresolvable packages, malformed lines or coordinates)
/// is skipped rather than raised.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A flat description file could not be read.
    #[error("Failed to read flat description {}: {source}", .path.display())]
    FlatDescriptionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Represents a node in the dependency graph.
///
/// Each node is one resolved package coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    /// The package this node stands for
    pub coordinate: Coordinate,
    /// Identity string, `group:artifact:version`
    pub id: String,
}

impl DependencyNode {
    /// Creates a new dependency node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomgraph::graph::DependencyNode;
    /// use pomgraph::parser::Coordinate;
    ///
    /// let node = DependencyNode::new(Coordinate::new("org.slf4j", "slf4j-api", "2.0.9"));
    /// assert_eq!(node.id, "org.slf4j:slf4j-api:2.0.9");
    /// ```
    pub fn new(coordinate: Coordinate) -> Self {
        let id = coordinate.id();
        Self { coordinate, id }
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// One recorded cycle.
///
/// `nodes` is the path that led to the repeated node, followed by the
/// repeated node itself, so the first and last entries are the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns the arrow-joined path, e.g. `"a -> b -> c -> a"`.
    pub fn cycle_path(&self) -> String {
        self.nodes.join(PATH_SEPARATOR)
    }

    /// Returns the number of entries in the path, repeated node included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for CycleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", CYCLE_LABEL, self.cycle_path())
    }
}

/// State for one traversal pass.
///
/// `visited` holds nodes whose subtree has already been walked in this pass.
/// `path` and `on_path` mirror the current depth-first stack only.
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<NodeIndex>,
    on_path: HashSet<NodeIndex>,
    path: Vec<NodeIndex>,
}

impl Traversal {
    fn enter(&mut self, idx: NodeIndex) {
        self.on_path.insert(idx);
        self.path.push(idx);
    }

    fn leave(&mut self, idx: NodeIndex) {
        self.on_path.remove(&idx);
        self.path.pop();
    }

    fn cycle_to(&self, graph: &DiGraph<DependencyNode, ()>, repeated: NodeIndex) -> CycleInfo {
        let nodes = self
            .path
            .iter()
            .chain(std::iter::once(&repeated))
            .map(|&idx| graph[idx].id.clone())
            .collect();
        CycleInfo { nodes }
    }
}

/// A frame of the explicit stack used by [`DependencyGraph::detect_cycles`].
struct Frame {
    node: NodeIndex,
    children: Vec<NodeIndex>,
    next: usize,
}

/// A directed graph of package coordinates.
///
/// Nodes live in a petgraph `DiGraph` arena and are registered by identity
/// string, so there is at most one node per coordinate. Edges point from a
/// package to its dependency and keep insertion order; repeated declarations
/// produce parallel edges.
///
/// # Example
///
/// ```rust
/// use pomgraph::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.build_from_flat_description("app -> lib1, lib2\nlib1 -> lib2\nlib2 -> app\n");
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 4);
/// assert_eq!(
///     graph.cycle_descriptions(),
///     vec!["Cycle: app:app:1.0 -> lib1:lib1:1.0 -> lib2:lib2:1.0 -> app:app:1.0".to_string()]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<DependencyNode, ()>,
    /// Maps identity strings to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
    /// Cycle records in detection order
    cycles: Vec<CycleInfo>,
    max_depth: usize,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Creates a new empty graph with [`DEFAULT_MAX_DEPTH`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomgraph::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// assert_eq!(graph.max_depth(), 3);
    /// ```
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Creates a new empty graph with the given depth bound (at least 1).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            cycles: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Returns the configured depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Removes all nodes, edges and cycle records. The depth bound is kept.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_indices.clear();
        self.cycles.clear();
    }

    /// Looks up the node for a coordinate, creating it on first use.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomgraph::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// let a = graph.get_or_create_node("org.example", "core", "1.0");
    /// let b = graph.get_or_create_node("org.example", "core", "1.0");
    ///
    /// assert_eq!(a, b);
    /// assert_eq!(graph.node_count(), 1);
    /// ```
    pub fn get_or_create_node(&mut self, group: &str, artifact: &str, version: &str) -> NodeIndex {
        self.get_or_create(&Coordinate::new(group, artifact, version))
    }

    /// Same as [`get_or_create_node`](Self::get_or_create_node), keyed by a
    /// coordinate.
    pub fn get_or_create(&mut self, coordinate: &Coordinate) -> NodeIndex {
        let id = coordinate.id();
        if let Some(&idx) = self.node_indices.get(&id) {
            return idx;
        }

        let idx = self.graph.add_node(DependencyNode::new(coordinate.clone()));
        self.node_indices.insert(id, idx);
        idx
    }

    /// Expands the graph from `root` by asking `resolver` for each node's
    /// direct dependencies.
    ///
    /// Clears earlier cycle records and starts a fresh pass. A node reached
    /// at depth `max_depth` or deeper is not expanded; it may still be
    /// expanded later in the same pass if reached again by a shorter path.
    /// A dependency already on the current path is recorded as a cycle and
    /// not followed. A node already expanded in this pass is not expanded
    /// again. Malformed coordinates and placeholder versions are skipped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pomgraph::graph::DependencyGraph;
    /// use pomgraph::parser::Coordinate;
    ///
    /// let resolver = |coord: &Coordinate, _repo: &str| -> Vec<String> {
    ///     match coord.artifact.as_str() {
    ///         "app" => vec!["g:lib:1".to_string()],
    ///         _ => Vec::new(),
    ///     }
    /// };
    ///
    /// let mut graph = DependencyGraph::new();
    /// let root = graph.get_or_create_node("g", "app", "1");
    /// graph.build_graph(root, &resolver, "https://repo.example.com/");
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// assert!(graph.contains("g:lib:1"));
    /// ```
    pub fn build_graph<R>(&mut self, root: NodeIndex, resolver: &R, repository: &str)
    where
        R: DependencyResolver + ?Sized,
    {
        self.cycles.clear();
        if self.graph.node_weight(root).is_none() {
            debug!("Root {:?} is not in the graph; nothing to build", root);
            return;
        }

        let mut traversal = Traversal::default();
        self.expand(root, resolver, repository, &mut traversal, 0);

        debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            cycles = self.cycles.len(),
            "Graph build finished"
        );
    }

    /// Creates the root node for `coordinate` and builds from it.
    pub fn build_from_root<R>(
        &mut self,
        coordinate: &Coordinate,
        resolver: &R,
        repository: &str,
    ) -> NodeIndex
    where
        R: DependencyResolver + ?Sized,
    {
        let root = self.get_or_create(coordinate);
        self.build_graph(root, resolver, repository);
        root
    }

    fn expand<R>(
        &mut self,
        idx: NodeIndex,
        resolver: &R,
        repository: &str,
        traversal: &mut Traversal,
        depth: usize,
    ) where
        R: DependencyResolver + ?Sized,
    {
        if depth >= self.max_depth {
            trace!("Depth limit reached at {}", self.graph[idx].id);
            return;
        }

        if traversal.on_path.contains(&idx) {
            let cycle = traversal.cycle_to(&self.graph, idx);
            info!("{}", cycle);
            self.cycles.push(cycle);
            return;
        }

        if !traversal.visited.insert(idx) {
            return;
        }

        traversal.enter(idx);

        let coordinate = self.graph[idx].coordinate.clone();
        debug!(depth, "Expanding {}", coordinate);

        for dep in resolver.resolve(&coordinate, repository) {
            let Some(dep_coordinate) = Coordinate::parse(&dep) else {
                debug!("Skipping malformed coordinate: {:?}", dep);
                continue;
            };
            if dep_coordinate.has_placeholder_version() {
                debug!("Skipping placeholder version: {}", dep);
                continue;
            }

            let child = self.get_or_create(&dep_coordinate);
            self.graph.add_edge(idx, child, ());
            self.expand(child, resolver, repository, traversal, depth + 1);
        }

        traversal.leave(idx);
    }

    /// Replaces the graph with the contents of a flat description and runs
    /// [`detect_cycles`](Self::detect_cycles) over it.
    ///
    /// See [`crate::parser::flat`] for the format. Malformed lines are
    /// skipped.
    pub fn build_from_flat_description(&mut self, source: &str) {
        self.clear();

        for entry in flat::parse_str(source) {
            let parent = self.get_or_create(&entry.parent_coordinate());
            for child in entry.child_coordinates() {
                let child = self.get_or_create(&child);
                self.graph.add_edge(parent, child, ());
            }
        }

        debug!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            "Loaded flat description"
        );

        self.detect_cycles();
    }

    /// Reads a flat description file and loads it with
    /// [`build_from_flat_description`](Self::build_from_flat_description).
    pub fn load_flat_description(&mut self, path: &Path) -> Result<(), GraphError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| GraphError::FlatDescriptionRead {
                path: path.to_path_buf(),
                source,
            })?;

        self.build_from_flat_description(&source);
        Ok(())
    }

    /// Runs cycle detection over the current edge set, replacing earlier
    /// records.
    ///
    /// Walks depth-first from every node not already walked, in registry
    /// order. A dependency already on the current path is recorded and not
    /// followed; a node walked earlier is skipped. Records match those
    /// produced during [`build_graph`](Self::build_graph).
    pub fn detect_cycles(&mut self) -> &[CycleInfo] {
        self.cycles.clear();
        let mut traversal = Traversal::default();

        let starts: Vec<NodeIndex> = self.graph.node_indices().collect();
        for start in starts {
            if !traversal.visited.contains(&start) {
                self.walk(start, &mut traversal);
            }
        }

        &self.cycles
    }

    fn walk(&mut self, start: NodeIndex, traversal: &mut Traversal) {
        traversal.visited.insert(start);
        traversal.enter(start);
        let mut stack = vec![Frame {
            node: start,
            children: self.outgoing(start),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                let node = frame.node;
                stack.pop();
                traversal.leave(node);
                continue;
            };
            frame.next += 1;

            if traversal.on_path.contains(&child) {
                let cycle = traversal.cycle_to(&self.graph, child);
                info!("{}", cycle);
                self.cycles.push(cycle);
                continue;
            }

            if !traversal.visited.insert(child) {
                continue;
            }

            traversal.enter(child);
            stack.push(Frame {
                node: child,
                children: self.outgoing(child),
                next: 0,
            });
        }
    }

    /// Dependency targets of `idx` in the order the edges were added.
    fn outgoing(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|&(id, _)| id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Gets a reference to a node by identity string.
    pub fn get_node(&self, id: &str) -> Option<&DependencyNode> {
        self.node_indices
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Gets a reference to a node by index.
    pub fn node(&self, idx: NodeIndex) -> Option<&DependencyNode> {
        self.graph.node_weight(idx)
    }

    /// Returns the index registered for an identity string.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_indices.get(id).copied()
    }

    /// Gets the direct dependencies of a node, in declaration order.
    ///
    /// Returns an empty vector for unknown ids.
    pub fn get_dependencies(&self, id: &str) -> Vec<&DependencyNode> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.outgoing(idx)
            .into_iter()
            .filter_map(|target| self.graph.node_weight(target))
            .collect()
    }

    /// Gets the nodes that depend directly on a node.
    pub fn get_dependents(&self, id: &str) -> Vec<&DependencyNode> {
        let Some(&idx) = self.node_indices.get(id) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .collect()
    }

    /// Gets all nodes in creation order.
    pub fn get_all_nodes(&self) -> Vec<&DependencyNode> {
        self.graph.node_weights().collect()
    }

    /// Returns every edge as `(dependent id, dependency id)`, grouped by
    /// dependent in creation order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .node_indices()
            .flat_map(|idx| {
                let from = self.graph[idx].id.as_str();
                self.outgoing(idx)
                    .into_iter()
                    .map(move |target| (from, self.graph[target].id.as_str()))
            })
            .collect()
    }

    /// Returns the cycles recorded by the last build or detection pass.
    pub fn cycles(&self) -> &[CycleInfo] {
        &self.cycles
    }

    /// Returns the recorded cycles as `Cycle: a -> b -> a` strings.
    pub fn cycle_descriptions(&self) -> Vec<String> {
        self.cycles.iter().map(ToString::to_string).collect()
    }

    /// Returns true if the last pass recorded at least one cycle.
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Returns true if the edge set contains a cycle anywhere, whether or
    /// not a pass reached it.
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Checks if a node exists in the graph.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Resolver backed by a fixed `id -> [dependency ids]` table.
    fn table_resolver(
        table: &[(&str, &[&str])],
    ) -> impl Fn(&Coordinate, &str) -> Vec<String> {
        let map: HashMap<String, Vec<String>> = table
            .iter()
            .map(|(parent, deps)| {
                (
                    parent.to_string(),
                    deps.iter().map(|d| d.to_string()).collect(),
                )
            })
            .collect();

        move |coord: &Coordinate, _repo: &str| map.get(&coord.id()).cloned().unwrap_or_default()
    }

    fn assert_no_dangling_edges(graph: &DependencyGraph) {
        for (from, to) in graph.edges() {
            assert!(graph.contains(from), "missing source {from}");
            assert!(graph.contains(to), "missing target {to}");
        }
    }

    const REPO: &str = "https://repo.example.com/maven2/";

    #[test]
    fn test_create_empty_graph() {
        let graph = DependencyGraph::new();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
        assert!(!graph.has_cycles());
        assert_eq!(graph.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_max_depth_is_at_least_one() {
        assert_eq!(DependencyGraph::with_max_depth(0).max_depth(), 1);
        assert_eq!(DependencyGraph::with_max_depth(7).max_depth(), 7);
    }

    #[test]
    fn test_get_or_create_node_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let a = graph.get_or_create_node("org.example", "core", "1.0");
        let b = graph.get_or_create_node("org.example", "core", "1.0");
        let c = graph.get_or_create_node("org.example", "core", "1.1");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(graph.node_count(), 2);

        let node = graph.get_node("org.example:core:1.0").unwrap();
        assert_eq!(node.coordinate.artifact, "core");
        assert_eq!(graph.node_index("org.example:core:1.0"), Some(a));
    }

    #[test]
    fn test_build_root_without_dependencies() {
        let resolver = table_resolver(&[]);
        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "leaf", "1"), &resolver, REPO);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.cycles().is_empty());
    }

    #[test]
    fn test_build_simple_tree() {
        let resolver = table_resolver(&[
            ("g:app:1", &["g:core:1", "g:util:1"]),
            ("g:core:1", &["g:util:1"]),
        ]);

        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "app", "1"), &resolver, REPO);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.has_cycles());

        let deps: Vec<&str> = graph
            .get_dependencies("g:app:1")
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(deps, vec!["g:core:1", "g:util:1"]);

        let dependents = graph.get_dependents("g:util:1");
        assert_eq!(dependents.len(), 2);
        assert_no_dangling_edges(&graph);
    }

    #[test]
    fn test_resolver_receives_repository() {
        let seen = RefCell::new(Vec::new());
        let resolver = |coord: &Coordinate, repo: &str| -> Vec<String> {
            seen.borrow_mut().push((coord.id(), repo.to_string()));
            Vec::new()
        };

        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "app", "1"), &resolver, REPO);

        assert_eq!(
            seen.into_inner(),
            vec![("g:app:1".to_string(), REPO.to_string())]
        );
    }

    #[test]
    fn test_depth_bound_creates_but_does_not_expand() {
        let table = table_resolver(&[
            ("g:a:1", &["g:b:1"]),
            ("g:b:1", &["g:c:1"]),
            ("g:c:1", &["g:d:1"]),
            ("g:d:1", &["g:e:1"]),
        ]);
        let calls = RefCell::new(Vec::new());
        let resolver = |coord: &Coordinate, repo: &str| -> Vec<String> {
            calls.borrow_mut().push(coord.id());
            table(coord, repo)
        };

        let mut graph = DependencyGraph::with_max_depth(3);
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        // d sits at depth 3: created by c, never expanded
        assert!(graph.contains("g:d:1"));
        assert!(!graph.contains("g:e:1"));
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(calls.into_inner(), vec!["g:a:1", "g:b:1", "g:c:1"]);
    }

    #[test]
    fn test_node_at_cutoff_is_expanded_when_reached_by_shorter_path() {
        let table = table_resolver(&[
            ("g:a:1", &["g:b:1", "g:c:1"]),
            ("g:b:1", &["g:c:1"]),
            ("g:c:1", &["g:x:1"]),
        ]);
        let calls = RefCell::new(Vec::new());
        let resolver = |coord: &Coordinate, repo: &str| -> Vec<String> {
            calls.borrow_mut().push(coord.id());
            table(coord, repo)
        };

        let mut graph = DependencyGraph::with_max_depth(2);
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        // c is first reached at depth 2 via b, then expanded at depth 1 via a
        assert_eq!(calls.into_inner(), vec!["g:a:1", "g:b:1", "g:c:1"]);
        assert!(graph.contains("g:x:1"));
    }

    #[test]
    fn test_visited_nodes_are_not_expanded_twice() {
        let table = table_resolver(&[
            ("g:a:1", &["g:b:1", "g:c:1"]),
            ("g:b:1", &["g:d:1"]),
            ("g:c:1", &["g:d:1"]),
            ("g:d:1", &["g:e:1"]),
        ]);
        let calls = RefCell::new(Vec::new());
        let resolver = |coord: &Coordinate, repo: &str| -> Vec<String> {
            calls.borrow_mut().push(coord.id());
            table(coord, repo)
        };

        let mut graph = DependencyGraph::with_max_depth(10);
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        let calls = calls.into_inner();
        assert_eq!(calls.iter().filter(|id| *id == "g:d:1").count(), 1);
        assert_eq!(graph.edge_count(), 5);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_cycle_detected_during_build() {
        let resolver = table_resolver(&[
            ("g:a:1", &["g:b:1"]),
            ("g:b:1", &["g:c:1"]),
            ("g:c:1", &["g:a:1"]),
        ]);

        let mut graph = DependencyGraph::with_max_depth(4);
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        assert_eq!(
            graph.cycle_descriptions(),
            vec!["Cycle: g:a:1 -> g:b:1 -> g:c:1 -> g:a:1".to_string()]
        );
        assert_eq!(graph.cycles()[0].len(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.is_cyclic());
    }

    #[test]
    fn test_depth_limit_is_checked_before_cycles() {
        let resolver = table_resolver(&[
            ("g:a:1", &["g:b:1"]),
            ("g:b:1", &["g:c:1"]),
            ("g:c:1", &["g:a:1"]),
        ]);

        // The back edge to a is reached at depth 3, which is already cut off
        let mut graph = DependencyGraph::with_max_depth(3);
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.has_cycles());
        assert!(graph.is_cyclic());
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let resolver = table_resolver(&[("g:a:1", &["g:a:1"])]);

        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        assert_eq!(
            graph.cycle_descriptions(),
            vec!["Cycle: g:a:1 -> g:a:1".to_string()]
        );
    }

    #[test]
    fn test_rebuild_replaces_cycle_records() {
        let resolver = table_resolver(&[("g:a:1", &["g:b:1"]), ("g:b:1", &["g:a:1"])]);

        let mut graph = DependencyGraph::new();
        let root = graph.get_or_create_node("g", "a", "1");
        graph.build_graph(root, &resolver, REPO);
        graph.build_graph(root, &resolver, REPO);

        assert_eq!(graph.cycles().len(), 1);
    }

    #[test]
    fn test_malformed_and_placeholder_coordinates_are_skipped() {
        let resolver = table_resolver(&[(
            "g:a:1",
            &["g:b", "", "g:c:${project.version}", "g::1", "g:d:1"],
        )]);

        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(), vec![("g:a:1", "g:d:1")]);
    }

    #[test]
    fn test_duplicate_dependencies_keep_parallel_edges() {
        let resolver = table_resolver(&[("g:a:1", &["g:b:1", "g:b:1"])]);

        let mut graph = DependencyGraph::new();
        graph.build_from_root(&Coordinate::new("g", "a", "1"), &resolver, REPO);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_build_with_unknown_root_does_nothing() {
        let resolver = table_resolver(&[]);
        let mut graph = DependencyGraph::new();
        graph.build_graph(NodeIndex::new(5), &resolver, REPO);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_flat_description_scenario() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description(
            "# sample\napp -> lib1, lib2\nlib1 -> lib2\nlib2 -> app\n",
        );

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(
            graph.cycle_descriptions(),
            vec!["Cycle: app:app:1.0 -> lib1:lib1:1.0 -> lib2:lib2:1.0 -> app:app:1.0".to_string()]
        );
        assert_no_dangling_edges(&graph);
    }

    #[test]
    fn test_flat_description_leaf_and_malformed_lines() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description("app -> lib\nlib ->\nthis is not an edge\na -> b -> c\n");

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(), vec![("app:app:1.0", "lib:lib:1.0")]);
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_flat_description_replaces_previous_contents() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description("a -> b\nb -> a\n");
        graph.build_from_flat_description("x -> y\n");

        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains("x:x:1.0"));
        assert!(!graph.contains("a:a:1.0"));
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_flat_description_is_deterministic() {
        let source = "a -> b, c\nb -> d\nc -> d, a\nd -> b\n";

        let mut first = DependencyGraph::new();
        first.build_from_flat_description(source);
        let mut second = DependencyGraph::new();
        second.build_from_flat_description(source);

        let first_ids: Vec<&str> = first.get_all_nodes().iter().map(|n| n.id.as_str()).collect();
        let second_ids: Vec<&str> = second.get_all_nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        assert_eq!(first.edges(), second.edges());
        assert_eq!(first.cycle_descriptions(), second.cycle_descriptions());
    }

    #[test]
    fn test_detect_cycles_reports_each_back_edge() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description("a -> b, c\nb -> d\nc -> d, a\nd -> b\n");

        // a -> b -> d -> b, then c -> a on the way back
        assert_eq!(
            graph.cycle_descriptions(),
            vec![
                "Cycle: a:a:1.0 -> b:b:1.0 -> d:d:1.0 -> b:b:1.0".to_string(),
                "Cycle: a:a:1.0 -> c:c:1.0 -> a:a:1.0".to_string(),
            ]
        );
    }

    #[test]
    fn test_flat_and_resolver_builds_agree() {
        let source = "app -> lib1, lib2\nlib1 -> lib2\nlib2 -> app\n";

        let mut flat_graph = DependencyGraph::new();
        flat_graph.build_from_flat_description(source);

        let table: HashMap<String, Vec<String>> = flat::parse_str(source)
            .iter()
            .map(|entry| {
                (
                    entry.parent_coordinate().id(),
                    entry.child_coordinates().iter().map(Coordinate::id).collect(),
                )
            })
            .collect();
        let resolver = move |coord: &Coordinate, _repo: &str| -> Vec<String> {
            table.get(&coord.id()).cloned().unwrap_or_default()
        };

        let mut built = DependencyGraph::with_max_depth(10);
        built.build_from_root(&flat::token_coordinate("app"), &resolver, REPO);

        let mut flat_edges = flat_graph.edges();
        let mut built_edges = built.edges();
        flat_edges.sort();
        built_edges.sort();

        assert_eq!(flat_edges, built_edges);
        assert_eq!(flat_graph.cycle_descriptions(), built.cycle_descriptions());
    }

    #[test]
    fn test_detect_cycles_handles_long_chains() {
        let mut source = String::new();
        for i in 0..50_000 {
            source.push_str(&format!("n{} -> n{}\n", i, i + 1));
        }
        source.push_str("n50000 -> n0\n");

        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description(&source);

        assert_eq!(graph.cycles().len(), 1);
        assert_eq!(graph.cycles()[0].len(), 50_002);
    }

    #[test]
    fn test_load_flat_description_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        std::fs::write(&path, "a -> b\nb -> a\n").unwrap();

        let mut graph = DependencyGraph::new();
        graph.load_flat_description(&path).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.cycles().len(), 1);
    }

    #[test]
    fn test_load_flat_description_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let mut graph = DependencyGraph::new();
        let err = graph.load_flat_description(&path).unwrap_err();

        assert!(matches!(err, GraphError::FlatDescriptionRead { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_cycle_info_display() {
        let cycle = CycleInfo {
            nodes: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(cycle.cycle_path(), "a -> b -> a");
        assert_eq!(cycle.to_string(), "Cycle: a -> b -> a");
        assert!(!cycle.is_empty());
    }
}

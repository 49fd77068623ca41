//! Export functionality for dependency graphs.
//!
//! This module provides exporters for writing a built graph in various
//! formats: plain text, JSON and Graphviz DOT.

pub mod dot;
pub mod json;
pub mod text;

use crate::graph::{CycleInfo, DependencyGraph};
use crate::parser::Coordinate;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text - one line per node, then the cycles
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// Graphviz DOT - input for an external renderer
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// One node and its direct dependencies.
#[derive(Debug, Clone)]
pub struct NodeReport {
    pub coordinate: Coordinate,
    pub id: String,
    /// Dependency ids in declaration order
    pub dependencies: Vec<String>,
}

/// Data container for export operations.
///
/// A snapshot of a built graph, detached from it.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Id of the node the build started from, if any
    pub root: Option<String>,
    /// Depth bound the graph was built with
    pub max_depth: usize,
    /// All nodes in creation order
    pub nodes: Vec<NodeReport>,
    /// Recorded cycles in detection order
    pub cycles: Vec<CycleInfo>,
}

impl ExportData {
    /// Create new export data from a graph.
    pub fn new(root: Option<&str>, graph: &DependencyGraph) -> Self {
        let nodes = graph
            .get_all_nodes()
            .into_iter()
            .map(|node| NodeReport {
                coordinate: node.coordinate.clone(),
                id: node.id.clone(),
                dependencies: graph
                    .get_dependencies(&node.id)
                    .iter()
                    .map(|dep| dep.id.clone())
                    .collect(),
            })
            .collect();

        Self {
            root: root.map(str::to_string),
            max_depth: graph.max_depth(),
            nodes,
            cycles: graph.cycles().to_vec(),
        }
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.dependencies.len()).sum()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Dot => dot::DotExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

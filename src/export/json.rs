//! JSON export implementation.
//!
//! Exports the dependency graph in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable node for JSON output.
#[derive(Serialize)]
struct JsonNode {
    id: String,
    group: String,
    artifact: String,
    version: String,
    dependencies: Vec<String>,
}

/// Serializable cycle info for JSON output.
#[derive(Serialize)]
struct JsonCycle {
    nodes: Vec<String>,
    path: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    nodes: usize,
    edges: usize,
    cycles: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<String>,
    max_depth: usize,
    summary: JsonSummary,
    nodes: Vec<JsonNode>,
    cycles: Vec<JsonCycle>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let nodes: Vec<JsonNode> = data
            .nodes
            .iter()
            .map(|n| JsonNode {
                id: n.id.clone(),
                group: n.coordinate.group.clone(),
                artifact: n.coordinate.artifact.clone(),
                version: n.coordinate.version.clone(),
                dependencies: n.dependencies.clone(),
            })
            .collect();

        let cycles: Vec<JsonCycle> = data
            .cycles
            .iter()
            .map(|c| JsonCycle {
                nodes: c.nodes.clone(),
                path: c.cycle_path(),
            })
            .collect();

        let export = JsonExport {
            root: data.root.clone(),
            max_depth: data.max_depth,
            summary: JsonSummary {
                nodes: data.nodes.len(),
                edges: data.edge_count(),
                cycles: data.cycles.len(),
            },
            nodes,
            cycles,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

//! Graphviz DOT export implementation.

use super::{ExportData, Exporter};
use std::collections::HashSet;
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph dependencies {{")?;
        writeln!(writer, "  rankdir=LR;")?;
        writeln!(writer, "  node [shape=box];")?;

        if let Some(root) = &data.root {
            writeln!(writer, "  {} [style=bold];", quote(root))?;
        }

        // Edges that close a recorded cycle.
        let back_edges: HashSet<(&str, &str)> = data
            .cycles
            .iter()
            .filter_map(|c| match c.nodes.as_slice() {
                [.., from, to] => Some((from.as_str(), to.as_str())),
                _ => None,
            })
            .collect();

        for node in &data.nodes {
            if node.dependencies.is_empty() {
                writeln!(writer, "  {};", quote(&node.id))?;
                continue;
            }
            for dep in &node.dependencies {
                if back_edges.contains(&(node.id.as_str(), dep.as_str())) {
                    writeln!(writer, "  {} -> {} [color=red];", quote(&node.id), quote(dep))?;
                } else {
                    writeln!(writer, "  {} -> {};", quote(&node.id), quote(dep))?;
                }
            }
        }

        writeln!(writer, "}}")
    }
}

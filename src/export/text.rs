//! Plain text export implementation.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "=== Dependency graph (max depth: {}) ===",
            data.max_depth
        )?;
        if let Some(root) = &data.root {
            writeln!(writer, "Root: {}", root)?;
        }
        writeln!(writer, "Total nodes: {}", data.nodes.len())?;

        for node in &data.nodes {
            if node.dependencies.is_empty() {
                writeln!(writer, "{} -> (no dependencies)", node.id)?;
            } else {
                writeln!(writer, "{} -> {}", node.id, node.dependencies.join(", "))?;
            }
        }

        if !data.cycles.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "=== Cycles detected ===")?;
            for cycle in &data.cycles {
                writeln!(writer, "{}", cycle)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyGraph;

    fn render(graph: &DependencyGraph, root: Option<&str>) -> String {
        let data = ExportData::new(root, graph);
        let mut output = Vec::new();
        TextExporter.export(&data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_export_lists_nodes() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description("app -> lib1, lib2\nlib1 ->\n");

        let text = render(&graph, Some("app:app:1.0"));

        assert_eq!(
            text,
            "=== Dependency graph (max depth: 3) ===\n\
             Root: app:app:1.0\n\
             Total nodes: 3\n\
             app:app:1.0 -> lib1:lib1:1.0, lib2:lib2:1.0\n\
             lib1:lib1:1.0 -> (no dependencies)\n\
             lib2:lib2:1.0 -> (no dependencies)\n"
        );
    }

    #[test]
    fn test_text_export_with_cycles() {
        let mut graph = DependencyGraph::new();
        graph.build_from_flat_description("a -> b\nb -> a\n");

        let text = render(&graph, None);

        assert!(!text.contains("Root:"));
        assert!(text.contains("=== Cycles detected ===\nCycle: a:a:1.0 -> b:b:1.0 -> a:a:1.0\n"));
    }
}

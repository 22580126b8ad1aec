//! Whitespace-separated edge list input

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::graph::{GraphBuilder, WeightedGraph};

/// Load an edge list file into a graph whose payloads are the node IDs
///
/// Each line holds `source target [weight]`; the weight defaults to 1.0.
/// Blank lines and lines starting with `#` are skipped.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<WeightedGraph<String>> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading edge list {}", path.display()))?;
    parse_edge_list(&text)
}

/// Parse edge list text, see [`load_edge_list`]
pub fn parse_edge_list(text: &str) -> Result<WeightedGraph<String>> {
    let mut id_to_index: HashMap<String, usize> = HashMap::new();
    let mut builder = GraphBuilder::default();
    let mut edge_lines = 0;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let (src, dst, weight) = match fields.as_slice() {
            [src, dst] => (*src, *dst, 1.0),
            [src, dst, weight] => {
                let weight: f64 = weight
                    .parse()
                    .with_context(|| format!("line {}: bad weight {:?}", line_no + 1, weight))?;
                (*src, *dst, weight)
            }
            _ => {
                return Err(anyhow!(
                    "line {}: expected `source target [weight]`, got {:?}",
                    line_no + 1,
                    line
                ))
            }
        };

        let src_idx = *id_to_index
            .entry(src.to_string())
            .or_insert_with(|| builder.add_node(src.to_string()));
        let dst_idx = *id_to_index
            .entry(dst.to_string())
            .or_insert_with(|| builder.add_node(dst.to_string()));

        builder
            .add_edge(src_idx, dst_idx, weight)
            .with_context(|| format!("line {}", line_no + 1))?;
        edge_lines += 1;
    }

    log::info!(
        "Parsed {} edges between {} nodes",
        edge_lines,
        builder.node_count()
    );

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_weights_comments_and_defaults() {
        let text = "# friendships\nalice bob 3\nbob carol\n\ncarol carol 2.5\n";
        let graph = parse_edge_list(text).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.total_weight(), 6.5);
        assert_eq!(graph.nodes()[0].payload(), "alice");
        assert_eq!(graph.nodes()[2].self_loops(), 2.5);
        assert!(graph.is_balanced());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_edge_list("alice\n").is_err());
        assert!(parse_edge_list("alice bob heavy\n").is_err());
        assert!(parse_edge_list("alice bob -1\n").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_edge_list("/nonexistent/edges.txt").is_err());
    }
}

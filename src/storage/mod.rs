//! Results persistence for the command-line front end

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde_json::{json, to_string_pretty};

use crate::cluster::metrics::internal_density;
use crate::cluster::Hierarchy;

/// Save a clustering run to the specified directory
///
/// `leaf_ids` are the IDs of the input nodes in index order.
pub fn save_results(
    hierarchy: &Hierarchy<String>,
    leaf_ids: &[String],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving results to {}", output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(hierarchy, output_dir)?;

    if hierarchy.leaf_clusters().is_some() {
        save_clusters(hierarchy, leaf_ids, output_dir)?;
    } else {
        log::warn!("Level history was not kept; skipping per-cluster membership");
    }

    log::info!("Results saved successfully");

    Ok(())
}

/// Save per-level statistics
fn save_summary(hierarchy: &Hierarchy<String>, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let graph = hierarchy.graph();
    let summary = json!({
        "converged": hierarchy.converged(),
        "level_count": hierarchy.level_count(),
        "total_weight": graph.total_weight(),
        "final_node_count": graph.node_count(),
        "final_edge_count": graph.edge_count(),
        "levels": hierarchy.levels(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save final clusters with their leaf members
fn save_clusters(hierarchy: &Hierarchy<String>, leaf_ids: &[String], output_dir: &str) -> Result<()> {
    log::info!("Saving cluster membership");

    let leaves = hierarchy
        .leaf_clusters()
        .ok_or_else(|| anyhow!("no leaf assignment available"))?;
    if leaves.len() != leaf_ids.len() {
        return Err(anyhow!(
            "leaf assignment covers {} nodes but {} IDs were given",
            leaves.len(),
            leaf_ids.len()
        ));
    }

    let graph = hierarchy.graph();
    let mut members: Vec<Vec<&str>> = vec![Vec::new(); graph.node_count()];
    for (leaf, &cluster) in leaves.labels().iter().enumerate() {
        members[cluster].push(leaf_ids[leaf].as_str());
    }

    let mut clusters: Vec<_> = graph
        .nodes()
        .iter()
        .zip(&members)
        .enumerate()
        .map(|(id, (node, members))| {
            json!({
                "id": id,
                "representative": node.payload(),
                "size": members.len(),
                "internal_density": internal_density(graph, &[id]),
                "members": members,
            })
        })
        .collect();

    // Largest clusters first
    clusters.sort_by(|a, b| b["size"].as_u64().cmp(&a["size"].as_u64()));

    let path = Path::new(output_dir).join("clusters.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&json!({ "clusters": clusters }))?.as_bytes())?;

    Ok(())
}

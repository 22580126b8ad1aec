//! Cluster statistics and metrics

use serde::{Deserialize, Serialize};

use crate::cluster::CommunityAssignment;
use crate::error::{ClusterError, Result};
use crate::graph::WeightedGraph;

/// Snapshot of one clustering level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Level number, 0 for the input graph
    pub level: usize,

    /// Nodes in the graph at this level
    pub node_count: usize,

    /// Non-zero neighbor relations at this level
    pub edge_count: usize,

    /// Total edge weight (conserved across levels)
    pub total_weight: f64,

    /// Modularity of the assignment found on this level's graph, if any
    pub modularity: Option<f64>,
}

impl LevelStats {
    /// Collect the size statistics of a graph
    pub fn of<P>(level: usize, graph: &WeightedGraph<P>) -> Self {
        Self {
            level,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            total_weight: graph.total_weight(),
            modularity: None,
        }
    }
}

/// Modularity of a partition of the graph
///
/// `Q = Σ_c [ in_c / 2m - (tot_c / 2m)^2 ]` where `in_c` sums the internal
/// neighbor weights of community `c` plus twice its self-loops and `tot_c`
/// is the degree sum of its members. A graph without weight scores 0.
pub fn modularity<P>(graph: &WeightedGraph<P>, assignment: &CommunityAssignment) -> Result<f64> {
    if assignment.len() != graph.node_count() {
        return Err(ClusterError::AssignmentMismatch {
            expected: graph.node_count(),
            found: assignment.len(),
        });
    }

    let m2 = 2.0 * graph.total_weight();
    if m2 == 0.0 {
        return Ok(0.0);
    }

    let dense = assignment.normalized();
    let labels = dense.labels();
    let community_count = labels.iter().copied().max().map_or(0, |max| max + 1);

    let mut internal = vec![0.0; community_count];
    let mut totals = vec![0.0; community_count];

    for (idx, node) in graph.nodes().iter().enumerate() {
        let community = labels[idx];
        totals[community] += node.degree();
        internal[community] += 2.0 * node.self_loops();
        for &(target, weight) in node.neighbors() {
            if labels[target] == community {
                internal[community] += weight;
            }
        }
    }

    let q = internal
        .iter()
        .zip(&totals)
        .map(|(&inside, &total)| inside / m2 - (total / m2) * (total / m2))
        .sum();

    Ok(q)
}

/// Weight of edges inside a community divided by its total degree
///
/// Returns 1.0 for isolated communities with no weight at all.
pub fn internal_density<P>(graph: &WeightedGraph<P>, members: &[usize]) -> f64 {
    let member_set: std::collections::HashSet<usize> = members.iter().copied().collect();

    let mut inside = 0.0;
    let mut total = 0.0;
    for &idx in members {
        let node = &graph.nodes()[idx];
        total += node.degree();
        inside += 2.0 * node.self_loops();
        for &(target, weight) in node.neighbors() {
            if member_set.contains(&target) {
                inside += weight;
            }
        }
    }

    if total == 0.0 {
        return 1.0;
    }
    inside / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn two_pairs() -> WeightedGraph<()> {
        let mut builder = GraphBuilder::default();
        for _ in 0..4 {
            builder.add_node(());
        }
        builder.add_edge(0, 1, 1.0).unwrap();
        builder.add_edge(2, 3, 1.0).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn modularity_of_natural_split() {
        let graph = two_pairs();
        let q = modularity(&graph, &CommunityAssignment::new(vec![0, 0, 1, 1])).unwrap();
        assert!((q - 0.5).abs() < 1e-12, "q = {}", q);
    }

    #[test]
    fn singletons_score_below_natural_split() {
        let graph = two_pairs();
        let q = modularity(&graph, &CommunityAssignment::singletons(4)).unwrap();
        assert!((q + 0.25).abs() < 1e-12, "q = {}", q);
    }

    #[test]
    fn modularity_rejects_wrong_length() {
        let graph = two_pairs();
        assert!(modularity(&graph, &CommunityAssignment::singletons(3)).is_err());
    }

    #[test]
    fn density_of_isolated_pair_is_one() {
        let graph = two_pairs();
        assert_eq!(internal_density(&graph, &[0, 1]), 1.0);
        assert_eq!(internal_density(&graph, &[1, 2]), 0.0);
    }
}

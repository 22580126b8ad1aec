//! Immutable weighted graph, one instance per clustering level

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::graph::Node;

/// Relative tolerance used when checking the degree invariant
const BALANCE_TOLERANCE: f64 = 1e-9;

/// Weighted graph whose nodes reference each other by index
///
/// `total_weight` is the `m` of the modularity formula: every undirected
/// edge counted once, self-loops included. With symmetric adjacency the sum
/// of node degrees equals `2 * total_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph<P> {
    total_weight: f64,
    nodes: Vec<Node<P>>,
}

impl<P> WeightedGraph<P> {
    /// Build a graph from its total edge weight and node sequence
    ///
    /// Fails with [`ClusterError::InvalidGraph`] on out-of-range neighbor
    /// indices or negative or non-finite weights.
    ///
    /// A node may not list itself in its neighbor list: an entry `(i, w)` on
    /// node `i` is rejected. Weight on an edge from a node to itself belongs
    /// in [`Node::self_loops`]. An unbalanced degree sum is only logged.
    pub fn new(total_weight: f64, nodes: Vec<Node<P>>) -> Result<Self> {
        if !total_weight.is_finite() || total_weight < 0.0 {
            return Err(ClusterError::invalid_graph(format!(
                "total weight must be a non-negative number, got {}",
                total_weight
            )));
        }

        let node_count = nodes.len();
        for (idx, node) in nodes.iter().enumerate() {
            let self_loops = node.self_loops();
            if !self_loops.is_finite() || self_loops < 0.0 {
                return Err(ClusterError::invalid_graph(format!(
                    "node {} has self-loop weight {}",
                    idx, self_loops
                )));
            }

            for &(target, weight) in node.neighbors() {
                if target >= node_count {
                    return Err(ClusterError::invalid_graph(format!(
                        "node {} references neighbor {} but the graph has {} nodes",
                        idx, target, node_count
                    )));
                }
                if target == idx {
                    return Err(ClusterError::invalid_graph(format!(
                        "node {} lists itself as a neighbor; use the self-loop weight instead",
                        idx
                    )));
                }
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ClusterError::invalid_graph(format!(
                        "edge {} -> {} has weight {}",
                        idx, target, weight
                    )));
                }
            }
        }

        let graph = Self { total_weight, nodes };
        if !graph.is_balanced() {
            log::warn!(
                "Degree sum {} does not match twice the total weight {}; adjacency may be asymmetric",
                graph.degree_sum(),
                total_weight
            );
        }

        Ok(graph)
    }

    /// Number of nodes at this level
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total edge weight, each undirected edge counted once
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// All nodes in index order
    pub fn nodes(&self) -> &[Node<P>] {
        &self.nodes
    }

    /// Get a node by index
    pub fn node(&self, idx: usize) -> Option<&Node<P>> {
        self.nodes.get(idx)
    }

    /// Weighted degree of a node
    ///
    /// Panics if `idx` is out of range, like slice indexing.
    pub fn degree(&self, idx: usize) -> f64 {
        self.nodes[idx].degree()
    }

    /// Degrees of all nodes in index order
    pub fn degrees(&self) -> Vec<f64> {
        self.nodes.iter().map(Node::degree).collect()
    }

    /// Sum of all node degrees
    pub fn degree_sum(&self) -> f64 {
        self.nodes.iter().map(Node::degree).sum()
    }

    /// Read-only iteration over a node's weighted neighbor references
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes[idx].neighbors().iter().copied()
    }

    /// Number of neighbor relations carrying non-zero weight
    ///
    /// Each direction of an undirected edge is counted, self-loops are not.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.neighbors().iter().filter(|&&(_, w)| w != 0.0).count())
            .sum()
    }

    /// Whether the degree sum equals twice the total weight
    pub fn is_balanced(&self) -> bool {
        let expected = 2.0 * self.total_weight;
        let diff = (self.degree_sum() - expected).abs();
        diff <= BALANCE_TOLERANCE * expected.max(1.0)
    }

    /// Take ownership of the node sequence
    pub fn into_nodes(self) -> Vec<Node<P>> {
        self.nodes
    }
}

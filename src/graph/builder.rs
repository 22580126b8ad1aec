//! Graph construction module

use itertools::Itertools;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use crate::error::{ClusterError, Result};
use crate::graph::{Node, WeightedGraph};

/// Builder for incrementally constructing a symmetric WeightedGraph
pub struct GraphBuilder<P> {
    /// Node payloads in index order
    payloads: Vec<P>,

    /// Adjacency lists for each node, possibly with repeated targets
    adjacency_lists: Vec<Vec<(usize, f64)>>,

    /// Self-loop weight per node
    self_loops: Vec<f64>,

    /// Sum of all edge weights added, each undirected edge once
    total_weight: f64,
}

impl<P> Default for GraphBuilder<P> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<P> GraphBuilder<P> {
    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            payloads: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            self_loops: Vec::with_capacity(capacity),
            total_weight: 0.0,
        }
    }

    /// Number of nodes added so far
    pub fn node_count(&self) -> usize {
        self.payloads.len()
    }

    /// Add a node and return its index
    pub fn add_node(&mut self, payload: P) -> usize {
        let idx = self.payloads.len();
        self.payloads.push(payload);
        self.adjacency_lists.push(Vec::new());
        self.self_loops.push(0.0);
        idx
    }

    /// Add an undirected edge between two existing nodes
    ///
    /// Both directions are recorded. An edge from a node to itself adds to
    /// its self-loop weight. Repeated edges are summed at build time.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> Result<()> {
        let node_count = self.node_count();
        if a >= node_count || b >= node_count {
            return Err(ClusterError::invalid_graph(format!(
                "edge {} - {} references a node outside 0..{}",
                a, b, node_count
            )));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ClusterError::invalid_graph(format!(
                "edge {} - {} has weight {}",
                a, b, weight
            )));
        }

        if a == b {
            self.self_loops[a] += weight;
        } else {
            self.adjacency_lists[a].push((b, weight));
            self.adjacency_lists[b].push((a, weight));
        }
        self.total_weight += weight;

        Ok(())
    }

    /// Build the weighted graph
    pub fn build(self) -> Result<WeightedGraph<P>> {
        let nodes = self
            .payloads
            .into_iter()
            .zip(self.adjacency_lists)
            .zip(self.self_loops)
            .map(|((payload, mut list), self_loops)| {
                // Sort by target so duplicates become adjacent
                list.sort_by_key(|&(target, _)| target);
                let neighbors = list
                    .into_iter()
                    .coalesce(|prev, next| {
                        if prev.0 == next.0 {
                            Ok((prev.0, prev.1 + next.1))
                        } else {
                            Err((prev, next))
                        }
                    })
                    .collect();
                Node::with_edges(payload, neighbors, self_loops)
            })
            .collect();

        WeightedGraph::new(self.total_weight, nodes)
    }
}

/// Convert an undirected petgraph graph with `f64` edge weights
///
/// Node indices are preserved, payloads are cloned from node weights.
pub fn from_petgraph<P: Clone>(graph: &UnGraph<P, f64>) -> Result<WeightedGraph<P>> {
    let mut builder = GraphBuilder::with_capacity(graph.node_count());
    for idx in graph.node_indices() {
        builder.add_node(graph[idx].clone());
    }
    for edge in graph.edge_references() {
        builder.add_edge(edge.source().index(), edge.target().index(), *edge.weight())?;
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_both_directions() {
        let mut builder = GraphBuilder::with_capacity(2);
        let a = builder.add_node("a");
        let b = builder.add_node("b");
        builder.add_edge(a, b, 3.0).unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.total_weight(), 3.0);
        assert_eq!(graph.nodes()[0].neighbors(), &[(1, 3.0)]);
        assert_eq!(graph.nodes()[1].neighbors(), &[(0, 3.0)]);
        assert!(graph.is_balanced());
    }

    #[test]
    fn merges_duplicate_edges() {
        let mut builder = GraphBuilder::default();
        let a = builder.add_node(());
        let b = builder.add_node(());
        let c = builder.add_node(());
        builder.add_edge(a, c, 1.0).unwrap();
        builder.add_edge(a, b, 1.0).unwrap();
        builder.add_edge(b, a, 2.5).unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.nodes()[0].neighbors(), &[(1, 3.5), (2, 1.0)]);
        assert_eq!(graph.total_weight(), 4.5);
        assert!(graph.is_balanced());
    }

    #[test]
    fn loop_edges_become_self_loops() {
        let mut builder = GraphBuilder::default();
        let a = builder.add_node(());
        builder.add_edge(a, a, 2.0).unwrap();
        builder.add_edge(a, a, 1.0).unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.nodes()[0].self_loops(), 3.0);
        assert!(graph.nodes()[0].neighbors().is_empty());
        assert_eq!(graph.degree(0), 6.0);
        assert!(graph.is_balanced());
    }

    #[test]
    fn rejects_unknown_nodes_and_bad_weights() {
        let mut builder = GraphBuilder::default();
        let a = builder.add_node(());
        assert!(builder.add_edge(a, 7, 1.0).is_err());
        assert!(builder.add_edge(a, a, -1.0).is_err());
        assert!(builder.add_edge(a, a, f64::NAN).is_err());
    }

    #[test]
    fn converts_petgraph() {
        let mut g = UnGraph::<&str, f64>::new_undirected();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_edge(a, b, 2.0);
        g.add_edge(b, c, 1.0);
        g.add_edge(c, c, 4.0);

        let graph = from_petgraph(&g).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.total_weight(), 7.0);
        assert_eq!(*graph.nodes()[2].payload(), "c");
        assert_eq!(graph.nodes()[2].self_loops(), 4.0);
        assert!(graph.is_balanced());
    }
}

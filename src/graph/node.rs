//! Graph node carrying a caller-defined payload

use serde::{Deserialize, Serialize};

/// A node of a weighted graph level
///
/// Neighbors reference other nodes of the owning graph by index.
/// Self-loop weight is kept apart from the neighbor list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<P> {
    /// Caller-defined data attached to the node
    payload: P,

    /// Outgoing weighted references: (target index, weight)
    neighbors: Vec<(usize, f64)>,

    /// Aggregated weight of the edge from this node to itself
    self_loops: f64,
}

impl<P: Default> Default for Node<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<P> Node<P> {
    /// Create an isolated node holding the given payload
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            neighbors: Vec::new(),
            self_loops: 0.0,
        }
    }

    /// Create a node with a full set of neighbors and a self-loop weight
    pub fn with_edges(payload: P, neighbors: Vec<(usize, f64)>, self_loops: f64) -> Self {
        Self {
            payload,
            neighbors,
            self_loops,
        }
    }

    /// Get the payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Get the payload for modification
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Take ownership of the payload
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Get outgoing weighted references
    pub fn neighbors(&self) -> &[(usize, f64)] {
        &self.neighbors
    }

    /// Mutable neighbor list, for callers assembling nodes before graph construction
    pub fn neighbors_mut(&mut self) -> &mut Vec<(usize, f64)> {
        &mut self.neighbors
    }

    /// Append a neighbor reference
    pub fn add_neighbor(&mut self, target: usize, weight: f64) {
        self.neighbors.push((target, weight));
    }

    /// Get the self-loop weight
    pub fn self_loops(&self) -> f64 {
        self.self_loops
    }

    /// Replace the self-loop weight
    pub fn set_self_loops(&mut self, weight: f64) {
        self.self_loops = weight;
    }

    /// Weighted degree: a self-loop counts on both of its ends
    pub fn degree(&self) -> f64 {
        self.self_loops * 2.0 + self.neighbors.iter().map(|&(_, w)| w).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_counts_self_loop_twice() {
        let mut node = Node::new("a");
        node.set_self_loops(3.0);
        node.add_neighbor(1, 2.0);
        node.add_neighbor(2, 0.5);

        assert_eq!(node.degree(), 8.5);
    }

    #[test]
    fn isolated_node_has_zero_degree() {
        let node: Node<u32> = Node::default();
        assert_eq!(node.degree(), 0.0);
        assert!(node.neighbors().is_empty());
    }

    #[test]
    fn payload_is_mutable_before_construction() {
        let mut node = Node::new(1u32);
        *node.payload_mut() += 41;
        assert_eq!(*node.payload(), 42);
        assert_eq!(node.into_payload(), 42);
    }
}

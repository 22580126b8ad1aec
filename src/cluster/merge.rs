//! Payload reduction applied when a community collapses into one node

use crate::error::{ClusterError, Result};
use crate::graph::Node;

/// Reduces the members of one community into the payload of its super-node
///
/// Members are passed in ascending node order. Implementations should be
/// deterministic for reproducible runs.
pub trait MergePolicy<P> {
    /// Produce the merged payload from a non-empty member slice
    ///
    /// Coarsening never passes an empty slice. Direct callers should go
    /// through [`MergePolicy::reduce`], which rejects one.
    ///
    /// # Panics
    ///
    /// Implementations may panic when `nodes` is empty.
    fn merge(&self, nodes: &[&Node<P>]) -> P;

    /// Checked entry point used during coarsening
    ///
    /// Returns [`ClusterError::InvalidMerge`] for an empty member slice.
    fn reduce(&self, nodes: &[&Node<P>]) -> Result<P> {
        if nodes.is_empty() {
            return Err(ClusterError::InvalidMerge);
        }
        Ok(self.merge(nodes))
    }
}

impl<P, F> MergePolicy<P> for F
where
    F: Fn(&[&Node<P>]) -> P,
{
    fn merge(&self, nodes: &[&Node<P>]) -> P {
        self(nodes)
    }
}

/// Keeps the payload of the member with the highest degree
///
/// The earliest member wins ties.
///
/// # Panics
///
/// [`MergePolicy::merge`] panics on an empty slice; use
/// [`MergePolicy::reduce`] for a checked call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDegree;

impl<P: Clone> MergePolicy<P> for MaxDegree {
    fn merge(&self, nodes: &[&Node<P>]) -> P {
        let Some((&first, rest)) = nodes.split_first() else {
            panic!("MaxDegree::merge called with no members");
        };
        let mut best = first;
        for &node in rest {
            if node.degree() > best.degree() {
                best = node;
            }
        }
        best.payload().clone()
    }
}

/// Keeps the payload of the lowest-indexed member
///
/// # Panics
///
/// [`MergePolicy::merge`] panics on an empty slice; use
/// [`MergePolicy::reduce`] for a checked call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMember;

impl<P: Clone> MergePolicy<P> for FirstMember {
    fn merge(&self, nodes: &[&Node<P>]) -> P {
        match nodes.first() {
            Some(node) => node.payload().clone(),
            None => panic!("FirstMember::merge called with no members"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, degree: f64) -> Node<u32> {
        Node::with_edges(id, vec![(0, degree)], 0.0)
    }

    #[test]
    fn max_degree_prefers_earliest_on_ties() {
        let (a, b, c) = (node(1, 2.0), node(2, 5.0), node(3, 5.0));
        assert_eq!(MaxDegree.reduce(&[&a, &b, &c]).unwrap(), 2);
    }

    #[test]
    fn first_member_keeps_first_payload() {
        let (a, b) = (node(10, 1.0), node(20, 9.0));
        assert_eq!(FirstMember.reduce(&[&a, &b]).unwrap(), 10);
    }

    #[test]
    fn closures_are_policies() {
        let sum = |nodes: &[&Node<u32>]| nodes.iter().map(|n| *n.payload()).sum::<u32>();
        let (a, b) = (node(4, 1.0), node(5, 1.0));
        assert_eq!(sum.reduce(&[&a, &b]).unwrap(), 9);
    }

    #[test]
    fn empty_input_is_a_contract_violation() {
        assert_eq!(
            MergePolicy::<u32>::reduce(&MaxDegree, &[]),
            Err(ClusterError::InvalidMerge)
        );
    }

    #[test]
    fn first_member_rejects_empty_input() {
        assert_eq!(
            MergePolicy::<u32>::reduce(&FirstMember, &[]),
            Err(ClusterError::InvalidMerge)
        );
    }

    #[test]
    fn closure_policies_reject_empty_input() {
        let first = |nodes: &[&Node<u32>]| *nodes[0].payload();
        assert_eq!(first.reduce(&[]), Err(ClusterError::InvalidMerge));
    }

    #[test]
    #[should_panic(expected = "no members")]
    fn unchecked_merge_panics_on_empty_input() {
        MergePolicy::<u32>::merge(&FirstMember, &[]);
    }
}

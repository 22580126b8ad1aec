//! Node-to-community assignments

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Community label for every node of one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityAssignment {
    labels: Vec<usize>,
}

impl CommunityAssignment {
    /// Create an assignment from per-node labels
    pub fn new(labels: Vec<usize>) -> Self {
        Self { labels }
    }

    /// Every node in its own community
    pub fn singletons(node_count: usize) -> Self {
        Self::new((0..node_count).collect())
    }

    /// Labels in node order
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Get the label of a node
    pub fn label(&self, node: usize) -> Option<usize> {
        self.labels.get(node).copied()
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no node is covered
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        self.normalized().labels.iter().copied().max().map_or(0, |max| max + 1)
    }

    /// Relabel communities to `0..K`, numbered by the first node seen in each
    pub fn normalized(&self) -> Self {
        let mut dense: HashMap<usize, usize> = HashMap::with_capacity(self.labels.len());
        let labels = self
            .labels
            .iter()
            .map(|&label| {
                let next = dense.len();
                *dense.entry(label).or_insert(next)
            })
            .collect();
        Self { labels }
    }

    /// Node indices of each community, assuming dense labels
    ///
    /// Members are listed in ascending node order.
    pub(crate) fn dense_members(&self) -> Vec<Vec<usize>> {
        let count = self.labels.iter().copied().max().map_or(0, |max| max + 1);
        let mut members = vec![Vec::new(); count];
        for (node, &label) in self.labels.iter().enumerate() {
            members[label].push(node);
        }
        members
    }

    /// Communities of the normalised assignment with their members
    pub fn members(&self) -> Vec<Vec<usize>> {
        self.normalized().dense_members()
    }

    /// Follow this assignment with the next level's one
    ///
    /// Node `i` ends up in `next[self[i]]`. Fails when a label of this
    /// assignment has no entry in `next`.
    pub fn compose(&self, next: &CommunityAssignment) -> Result<Self> {
        let labels = self
            .labels
            .iter()
            .map(|&label| {
                next.label(label).ok_or(ClusterError::AssignmentMismatch {
                    expected: label + 1,
                    found: next.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { labels })
    }
}

impl From<Vec<usize>> for CommunityAssignment {
    fn from(labels: Vec<usize>) -> Self {
        Self::new(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_by_first_occurrence() {
        let assignment = CommunityAssignment::new(vec![7, 3, 7, 9, 3]);
        assert_eq!(assignment.normalized().labels(), &[0, 1, 0, 2, 1]);
        assert_eq!(assignment.community_count(), 3);
    }

    #[test]
    fn members_are_ordered() {
        let assignment = CommunityAssignment::new(vec![4, 2, 4, 2, 5]);
        assert_eq!(assignment.members(), vec![vec![0, 2], vec![1, 3], vec![4]]);
    }

    #[test]
    fn compose_follows_levels() {
        let first = CommunityAssignment::new(vec![0, 0, 1, 2]);
        let second = CommunityAssignment::new(vec![0, 1, 1]);
        let composed = first.compose(&second).unwrap();
        assert_eq!(composed.labels(), &[0, 0, 1, 1]);
    }

    #[test]
    fn compose_rejects_short_next_level() {
        let first = CommunityAssignment::new(vec![0, 3]);
        let second = CommunityAssignment::new(vec![0, 1]);
        assert!(matches!(
            first.compose(&second),
            Err(ClusterError::AssignmentMismatch { .. })
        ));
    }

    #[test]
    fn empty_assignment_has_no_communities() {
        let assignment = CommunityAssignment::new(Vec::new());
        assert_eq!(assignment.community_count(), 0);
        assert!(assignment.members().is_empty());
    }
}

//! Error types for graph construction and clustering

use thiserror::Error;

/// Result alias used throughout the clustering core
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Failures raised by the clustering core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Malformed graph input
    #[error("invalid graph: {reason}")]
    InvalidGraph {
        /// What was wrong with the input
        reason: String,
    },

    /// An operation that needs at least one node got an empty graph
    #[error("graph has no nodes")]
    EmptyGraph,

    /// A merge policy was handed an empty community
    #[error("merge policy called with an empty node sequence")]
    InvalidMerge,

    /// An assignment does not line up with the graph or level it is applied to
    #[error("assignment covers {found} nodes, expected {expected}")]
    AssignmentMismatch {
        /// Number of nodes the assignment should cover
        expected: usize,
        /// Number of nodes it actually covers
        found: usize,
    },
}

impl ClusterError {
    pub(crate) fn invalid_graph(reason: impl Into<String>) -> Self {
        ClusterError::InvalidGraph { reason: reason.into() }
    }
}

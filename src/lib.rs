//! Hierarchical Louvain clustering of weighted graphs with arbitrary node payloads

pub mod config;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod data;
pub mod storage;

pub use cluster::{
    CommunityAssignment, Hierarchy, Level, LevelDriver, LocalOptimizer, MergePolicy,
};
pub use config::Config;
pub use error::{ClusterError, Result};
pub use graph::{GraphBuilder, Node, WeightedGraph};

/// Run one optimise-and-coarsen cycle with the default configuration
pub fn next_level<P, M>(graph: &WeightedGraph<P>, policy: &M) -> Result<Level<P>>
where
    P: Send + Sync,
    M: MergePolicy<P> + Sync,
{
    LevelDriver::default().next_level(graph, policy)
}

/// Build levels until they stop changing or `max_levels` is reached
pub fn run_to_convergence<P, M>(
    graph: WeightedGraph<P>,
    policy: &M,
    max_levels: usize,
) -> Result<Hierarchy<P>>
where
    P: Send + Sync,
    M: MergePolicy<P> + Sync,
{
    LevelDriver::default().run_to_convergence(graph, policy, max_levels)
}

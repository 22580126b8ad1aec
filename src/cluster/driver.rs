//! Repeated optimise-then-coarsen cycles until the hierarchy settles

use crate::cluster::coarsen::{Coarsener, Level};
use crate::cluster::metrics::{modularity, LevelStats};
use crate::cluster::optimizer::LocalOptimizer;
use crate::cluster::{CommunityAssignment, MergePolicy};
use crate::config::Config;
use crate::error::{ClusterError, Result};
use crate::graph::WeightedGraph;

/// Outcome of a multi-level run
#[derive(Debug, Clone)]
pub struct Hierarchy<P> {
    graph: WeightedGraph<P>,
    history: Option<Vec<CommunityAssignment>>,
    leaves: Option<CommunityAssignment>,
    levels: Vec<LevelStats>,
    converged: bool,
}

impl<P> Hierarchy<P> {
    /// Graph of the last level produced
    pub fn graph(&self) -> &WeightedGraph<P> {
        &self.graph
    }

    /// Take ownership of the final graph
    pub fn into_graph(self) -> WeightedGraph<P> {
        self.graph
    }

    /// Dense assignment of each level, first level first, when history was kept
    pub fn history(&self) -> Option<&[CommunityAssignment]> {
        self.history.as_deref()
    }

    /// Final node index of every input node, when history was kept
    pub fn leaf_clusters(&self) -> Option<&CommunityAssignment> {
        self.leaves.as_ref()
    }

    /// Statistics of the input graph followed by every produced level
    pub fn levels(&self) -> &[LevelStats] {
        &self.levels
    }

    /// Number of coarsening levels run
    pub fn level_count(&self) -> usize {
        self.levels.len() - 1
    }

    /// Whether the run stopped on an unchanged level rather than the level limit
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Drives the optimiser and coarsener level after level
#[derive(Debug, Clone)]
pub struct LevelDriver {
    optimizer: LocalOptimizer,
    coarsener: Coarsener,
    max_levels: usize,
    keep_history: bool,
}

impl Default for LevelDriver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl LevelDriver {
    /// Create a driver using the given configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            optimizer: LocalOptimizer::from_config(config),
            coarsener: Coarsener::from_config(config),
            max_levels: config.max_levels,
            keep_history: config.keep_history,
        }
    }

    /// Run one optimisation phase and collapse its communities
    pub fn next_level<P, M>(&self, graph: &WeightedGraph<P>, policy: &M) -> Result<Level<P>>
    where
        P: Send + Sync,
        M: MergePolicy<P> + Sync,
    {
        let outcome = self.optimizer.optimize_with_stats(graph)?;
        log::debug!(
            "Local moving finished after {} passes with {} moves",
            outcome.passes,
            outcome.moves
        );
        self.coarsener.coarsen(graph, &outcome.assignment, policy)
    }

    /// Run up to the configured level limit
    pub fn run<P, M>(&self, graph: WeightedGraph<P>, policy: &M) -> Result<Hierarchy<P>>
    where
        P: Send + Sync,
        M: MergePolicy<P> + Sync,
    {
        self.run_to_convergence(graph, policy, self.max_levels)
    }

    /// Build levels until node and edge counts stop changing or `max_levels` is hit
    pub fn run_to_convergence<P, M>(
        &self,
        graph: WeightedGraph<P>,
        policy: &M,
        max_levels: usize,
    ) -> Result<Hierarchy<P>>
    where
        P: Send + Sync,
        M: MergePolicy<P> + Sync,
    {
        if graph.is_empty() {
            return Err(ClusterError::EmptyGraph);
        }

        let mut levels = vec![LevelStats::of(0, &graph)];
        let mut history = self.keep_history.then(Vec::new);
        let mut leaves = self
            .keep_history
            .then(|| CommunityAssignment::singletons(graph.node_count()));
        let mut current = graph;
        let mut converged = false;

        log::info!(
            "Level 0 - Edges: {} / Nodes: {}",
            current.edge_count(),
            current.node_count()
        );

        for level in 1..=max_levels {
            let Level {
                graph: next,
                assignment,
            } = self.next_level(&current, policy)?;

            let q = modularity(&current, &assignment)?;
            let stats = LevelStats::of(level, &next);
            log::info!(
                "Level {} - Edges: {} / Nodes: {} (modularity {:.6})",
                level,
                stats.edge_count,
                stats.node_count,
                q
            );

            let previous = &mut levels[level - 1];
            previous.modularity = Some(q);
            let unchanged =
                stats.node_count == previous.node_count && stats.edge_count == previous.edge_count;

            if let Some(leaves) = leaves.as_mut() {
                *leaves = leaves.compose(&assignment)?;
            }
            if let Some(history) = history.as_mut() {
                history.push(assignment);
            }
            levels.push(stats);
            current = next;

            if unchanged {
                converged = true;
                log::info!("Converged after {} levels", level);
                break;
            }
        }

        if !converged {
            log::info!("Stopped at the level limit of {}", max_levels);
        }

        Ok(Hierarchy {
            graph: current,
            history,
            leaves,
            levels,
            converged,
        })
    }
}

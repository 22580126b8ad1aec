//! Greedy local moving phase of the Louvain method

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cluster::CommunityAssignment;
use crate::config::Config;
use crate::error::{ClusterError, Result};
use crate::graph::WeightedGraph;

/// Result of one optimisation phase
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeOutcome {
    /// Community of every node, labels not yet normalised
    pub assignment: CommunityAssignment,

    /// Passes run, including the final stable one
    pub passes: usize,

    /// Node moves over all passes
    pub moves: usize,

    /// Whether a pass without moves was reached before the pass limit
    pub stable: bool,
}

/// Moves nodes between communities while modularity improves
#[derive(Debug, Clone)]
pub struct LocalOptimizer {
    /// Upper bound on sweeps over all nodes
    max_passes: usize,

    /// Seed for shuffling the sweep order; index order when unset
    shuffle_seed: Option<u64>,
}

impl Default for LocalOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalOptimizer {
    /// Create an optimizer with index-order sweeps and a 100 pass limit
    pub fn new() -> Self {
        Self {
            max_passes: 100,
            shuffle_seed: None,
        }
    }

    /// Create an optimizer using the given configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_passes: config.max_passes,
            shuffle_seed: config.shuffle_seed,
        }
    }

    /// Set the maximum number of passes
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Sweep nodes in an order shuffled by a generator seeded with `seed`
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Find a community assignment for the graph
    pub fn optimize<P>(&self, graph: &WeightedGraph<P>) -> Result<CommunityAssignment> {
        Ok(self.optimize_with_stats(graph)?.assignment)
    }

    /// Find a community assignment and report how the search went
    pub fn optimize_with_stats<P>(&self, graph: &WeightedGraph<P>) -> Result<OptimizeOutcome> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Err(ClusterError::EmptyGraph);
        }

        let m = graph.total_weight();
        if m == 0.0 {
            // Every gain is zero, nothing can move
            return Ok(OptimizeOutcome {
                assignment: CommunityAssignment::singletons(node_count),
                passes: 0,
                moves: 0,
                stable: true,
            });
        }

        let degrees = graph.degrees();
        let mut communities: Vec<usize> = (0..node_count).collect();
        let mut community_degrees = degrees.clone();

        let mut order: Vec<usize> = (0..node_count).collect();
        let mut rng = self.shuffle_seed.map(StdRng::seed_from_u64);

        // Edge weight from the current node to each candidate community,
        // ordered by label so the lowest label wins ties
        let mut candidate_weights: BTreeMap<usize, f64> = BTreeMap::new();

        let mut passes = 0;
        let mut total_moves = 0;
        let mut stable = false;

        while passes < self.max_passes {
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }
            passes += 1;

            let mut moves = 0;
            for &node in &order {
                let current = communities[node];
                let k_i = degrees[node];

                // Take the node out of its community
                community_degrees[current] -= k_i;

                candidate_weights.clear();
                candidate_weights.insert(current, 0.0);
                for (target, weight) in graph.neighbors(node) {
                    *candidate_weights.entry(communities[target]).or_insert(0.0) += weight;
                }

                let current_gain =
                    modularity_gain(candidate_weights[&current], community_degrees[current], k_i, m);

                let mut best = current;
                let mut best_gain = 0.0;
                for (&community, &k_in) in &candidate_weights {
                    let gain = modularity_gain(k_in, community_degrees[community], k_i, m);
                    if gain > best_gain {
                        best_gain = gain;
                        best = community;
                    }
                }

                // Staying wins a tie with the best candidate
                if best != current && current_gain >= best_gain {
                    best = current;
                }

                community_degrees[best] += k_i;
                if best != current {
                    communities[node] = best;
                    moves += 1;
                }
            }

            log::debug!("Optimisation pass {}: {} nodes moved", passes, moves);
            total_moves += moves;

            if moves == 0 {
                stable = true;
                break;
            }
        }

        if !stable {
            log::debug!(
                "Stopped after {} passes without reaching a stable pass",
                passes
            );
        }

        Ok(OptimizeOutcome {
            assignment: CommunityAssignment::new(communities),
            passes,
            moves: total_moves,
            stable,
        })
    }
}

/// Gain in modularity from inserting a node into a community
///
/// `k_in` is the weight between the node and the community, `sigma_tot` the
/// community's degree sum without the node, `k_i` the node's degree.
fn modularity_gain(k_in: f64, sigma_tot: f64, k_i: f64, m: f64) -> f64 {
    k_in / m - sigma_tot * k_i / (2.0 * m * m)
}

//! Collapses communities into the super-nodes of the next level

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::cluster::{CommunityAssignment, MergePolicy};
use crate::config::Config;
use crate::error::{ClusterError, Result};
use crate::graph::{Node, WeightedGraph};

/// Community count from which aggregation is spread over the rayon pool
const PARALLEL_THRESHOLD: usize = 1000;

/// A coarsened graph together with the assignment that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Level<P> {
    /// Next-level graph, node `c` standing for community `c`
    pub graph: WeightedGraph<P>,

    /// Dense assignment mapping previous-level nodes to nodes of `graph`
    pub assignment: CommunityAssignment,
}

/// Builds the next-level graph from a community assignment
#[derive(Debug, Clone)]
pub struct Coarsener {
    parallel: bool,
}

impl Default for Coarsener {
    fn default() -> Self {
        Self::new()
    }
}

impl Coarsener {
    /// Create a coarsener that may use the rayon pool
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Create a coarsener using the given configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            parallel: config.parallel,
        }
    }

    /// Enable or disable parallel aggregation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Collapse every community of `assignment` into one node
    ///
    /// Labels are first made dense in order of first appearance. Member
    /// payloads are reduced by `policy`; edges inside a community become
    /// self-loop weight and edges between communities are summed. The
    /// total weight carries over unchanged.
    pub fn coarsen<P, M>(
        &self,
        graph: &WeightedGraph<P>,
        assignment: &CommunityAssignment,
        policy: &M,
    ) -> Result<Level<P>>
    where
        P: Send + Sync,
        M: MergePolicy<P> + Sync,
    {
        if assignment.len() != graph.node_count() {
            return Err(ClusterError::AssignmentMismatch {
                expected: graph.node_count(),
                found: assignment.len(),
            });
        }

        let dense = assignment.normalized();
        let members = dense.dense_members();
        let labels = dense.labels();

        // Output order follows community order on both paths
        let nodes = if self.parallel && members.len() >= PARALLEL_THRESHOLD {
            members
                .par_iter()
                .map(|group| aggregate_community(graph, labels, group, policy))
                .collect::<Result<Vec<_>>>()?
        } else {
            members
                .iter()
                .map(|group| aggregate_community(graph, labels, group, policy))
                .collect::<Result<Vec<_>>>()?
        };

        let next = WeightedGraph::new(graph.total_weight(), nodes)?;
        log::debug!(
            "Coarsened {} nodes into {} communities",
            graph.node_count(),
            next.node_count()
        );

        Ok(Level {
            graph: next,
            assignment: dense,
        })
    }
}

/// Build the super-node of one community
fn aggregate_community<P, M>(
    graph: &WeightedGraph<P>,
    labels: &[usize],
    members: &[usize],
    policy: &M,
) -> Result<Node<P>>
where
    M: MergePolicy<P>,
{
    let member_nodes: Vec<&Node<P>> = members.iter().map(|&idx| &graph.nodes()[idx]).collect();
    let payload = policy.reduce(&member_nodes)?;
    let community = labels[members[0]];

    let mut self_loops = 0.0;
    let mut internal = 0.0;
    let mut outgoing: BTreeMap<usize, f64> = BTreeMap::new();

    for node in &member_nodes {
        self_loops += node.self_loops();
        for &(target, weight) in node.neighbors() {
            let target_community = labels[target];
            if target_community == community {
                internal += weight;
            } else {
                *outgoing.entry(target_community).or_insert(0.0) += weight;
            }
        }
    }

    // Internal edges are listed from both ends
    self_loops += internal / 2.0;

    Ok(Node::with_edges(payload, outgoing.into_iter().collect(), self_loops))
}

//! Louvain community detection module

pub mod assignment;
pub mod merge;
pub mod optimizer;
pub mod coarsen;
pub mod driver;
pub mod metrics;

pub use assignment::CommunityAssignment;
pub use coarsen::{Coarsener, Level};
pub use driver::{Hierarchy, LevelDriver};
pub use merge::{FirstMember, MaxDegree, MergePolicy};
pub use metrics::{modularity, LevelStats};
pub use optimizer::{LocalOptimizer, OptimizeOutcome};

//! Graph representation module

pub mod node;
pub mod weighted;
pub mod builder;

pub use builder::{from_petgraph, GraphBuilder};
pub use node::Node;
pub use weighted::WeightedGraph;

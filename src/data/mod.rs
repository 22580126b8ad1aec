//! Input loading for the command-line front end

pub mod edgelist;

pub use edgelist::{load_edge_list, parse_edge_list};

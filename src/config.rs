//! Configuration management for the clustering core

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tuning knobs for optimisation and level driving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum optimisation passes per level
    pub max_passes: usize,

    /// Maximum number of coarsening levels
    pub max_levels: usize,

    /// Seed for shuffled node order; `None` sweeps nodes in index order
    pub shuffle_seed: Option<u64>,

    /// Keep per-level community assignments for leaf reconstruction
    pub keep_history: bool,

    /// Aggregate large levels on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_passes: 100,
            max_levels: 10,
            shuffle_seed: None,
            keep_history: true,
            parallel: true,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        max_passes: usize,
        max_levels: usize,
        shuffle_seed: Option<u64>,
        keep_history: bool,
        parallel: bool,
    ) -> Self {
        Self {
            max_passes,
            max_levels,
            shuffle_seed,
            keep_history,
            parallel,
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "max_levels": 3, "shuffle_seed": 7 }"#).unwrap();
        assert_eq!(config.max_levels, 3);
        assert_eq!(config.shuffle_seed, Some(7));
        assert_eq!(config.max_passes, Config::default().max_passes);
        assert!(config.keep_history);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_json_file("/nonexistent/louvain.json").is_err());
    }
}

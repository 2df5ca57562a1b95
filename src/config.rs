//! Graph configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides:
//!
//! ```yaml
//! initial_node_capacity: 100000
//! default_node_type: entity
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Store sizing and identity defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Nodes to reserve room for up front
    pub initial_node_capacity: usize,
    /// Edges to reserve room for up front
    pub initial_edge_capacity: usize,
    /// Type given to nodes built from attributes without a `_type`
    pub default_node_type: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            initial_node_capacity: 1024,
            initial_edge_capacity: 4096,
            default_node_type: "default".to_string(),
        }
    }
}

impl GraphConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&contents)?;
        info!("Loaded graph config from {:?}", path);
        Ok(config)
    }
}

//! Service configuration.
//!
//! Loaded once at startup from a YAML file and passed by reference into
//! handlers. Every section and field has a default, so an absent file or an
//! empty document yields a runnable configuration.

pub mod assets;
pub mod server;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use assets::{AssetsConfig, FontsConfig};
pub use server::ServerConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub fonts: FontsConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml(&yaml)
    }
}

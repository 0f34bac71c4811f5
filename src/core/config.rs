/// Agent configuration loaded from RON.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::batch::DEFAULT_SCENE_LIMIT;
use crate::core::catalog::{Catalog, CatalogError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Settings for the interactive prompt agent. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Catalog RON file; the built-in catalog is used when absent.
    pub catalog: Option<PathBuf>,
    /// Script whose prompt list gets patched.
    pub target: PathBuf,
    /// Name of the list literal inside `target`.
    pub list_name: String,
    /// Characters of each prompt shown in the preview.
    pub preview_width: usize,
    /// Fixed sampling seed. Unseeded when absent.
    pub seed: Option<u64>,
    /// Largest scene count accepted from one spec.
    pub max_scenes: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            target: PathBuf::from("test.py"),
            list_name: "JOINT_PROMPTS".to_string(),
            preview_width: 100,
            seed: None,
            max_scenes: DEFAULT_SCENE_LIMIT,
        }
    }
}

impl AgentConfig {
    pub fn load(path: &Path) -> Result<AgentConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<AgentConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load_from_ron(path)?,
            None => Catalog::builtin()?,
        };
        Ok(catalog)
    }
}

use crate::error::{Result, RubyscopeError};
use crate::logging::LogConfig;
use crate::samples::RuntimeSamples;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a resolver host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubyscopeConfig {
    pub log: LogConfig,
    /// JSON file holding the runtime type samples table.
    pub runtime_samples: Option<PathBuf>,
}

impl RubyscopeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| RubyscopeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the configured samples table, or an empty one when none is set.
    pub fn load_samples(&self) -> Result<RuntimeSamples> {
        match &self.runtime_samples {
            Some(path) => RuntimeSamples::load(path),
            None => Ok(RuntimeSamples::default()),
        }
    }
}

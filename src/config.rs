use crate::domain::BoardConfig;
use crate::error::{PathfinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for talking to the persistence backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How long a commit may take before it counts as failed
    pub commit_timeout_ms: u64,
    /// Artificial latency for the in-memory backend
    pub simulated_delay_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            commit_timeout_ms: 5_000,
            simulated_delay_ms: 0,
        }
    }
}

impl SyncConfig {
    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

/// Top-level configuration, usually read from `pathfinder.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfinderConfig {
    pub board: BoardConfig,
    pub sync: SyncConfig,
}

impl PathfinderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| PathfinderError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.board.columns.is_empty() {
            return Err(PathfinderError::ConfigError(
                "board must define at least one column".to_string(),
            ));
        }
        if self.sync.commit_timeout_ms == 0 {
            return Err(PathfinderError::ConfigError(
                "sync.commit_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

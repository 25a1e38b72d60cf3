//! Tick driver configuration with TOML file support.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use verity_types::SettlementParams;
use verity_utils::LogFormat;

/// File-level settings for `verity-settle`. CLI flags and environment
/// variables override them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettleConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// LMDB directory holding the persisted expiration queues and params.
    /// When unset, queues and params come from the genesis snapshot.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Params that replace the snapshot's params on import.
    #[serde(default)]
    pub params: Option<SettlementParams>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SettleConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in config {}", path.display()))
    }

    /// Parse and validate. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("parsing config")?;
        if let Some(params) = &config.params {
            params.validate()?;
        }
        Ok(config)
    }
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            data_dir: None,
            params: None,
        }
    }
}

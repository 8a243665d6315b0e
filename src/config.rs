//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Chains whose vaults are indexed
    #[serde(default = "default_chains")]
    pub chains: Vec<u64>,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// Where the discovered vaults, curated metadata and analytics are read from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub vaults_path: Option<PathBuf>,
    #[serde(default)]
    pub meta_path: Option<PathBuf>,
    #[serde(default)]
    pub analytics_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between enrichment passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_chains() -> Vec<u64> {
    vec![1]
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    300
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("refresh.interval_secs", default_interval_secs() as i64)?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix VAULT_INDEX_)
            .add_source(
                config::Environment::with_prefix("VAULT_INDEX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("chains")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chains.is_empty() {
            anyhow::bail!("At least one chain id must be configured");
        }

        let unique: HashSet<u64> = self.chains.iter().copied().collect();
        if unique.len() != self.chains.len() {
            anyhow::bail!("Duplicate chain ids in {:?}", self.chains);
        }

        if self.refresh.enabled && self.refresh.interval_secs == 0 {
            anyhow::bail!("refresh.interval_secs must be positive");
        }

        for path in [
            &self.data.vaults_path,
            &self.data.meta_path,
            &self.data.analytics_path,
        ]
        .into_iter()
        .flatten()
        {
            if !path.exists() {
                tracing::warn!(path = %path.display(), "Configured data file does not exist yet");
            }
        }

        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"Configuration:
  Chains: {:?}
  Data:
    vaults: {}
    meta: {}
    analytics: {}
  Refresh:
    enabled: {}
    interval: {}s
"#,
            self.chains,
            display_path(&self.data.vaults_path),
            display_path(&self.data.meta_path),
            display_path(&self.data.analytics_path),
            self.refresh.enabled,
            self.refresh.interval_secs,
        )
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chains: default_chains(),
            data: DataConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

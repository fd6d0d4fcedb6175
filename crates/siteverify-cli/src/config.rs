//! Configuration management for the siteverify CLI.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use siteverify::constants::{DEFAULT_MIN_SCORE, DEFAULT_TIMEOUT_SECS};

/// CLI configuration, loaded from a TOML file with flag overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Shared secret for the verification endpoint
    #[serde(default)]
    pub secret: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default v3 acceptance policy
    #[serde(default)]
    pub policy: PolicyDefaults,
}

/// v3 policy defaults from the config file
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyDefaults {
    /// Minimum accepted score
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Required action label (empty = no constraint)
    #[serde(default)]
    pub action: String,
}

impl Default for PolicyDefaults {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            action: String::new(),
        }
    }
}

// Default value functions
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }
fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }

impl CliConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref secret) = args.secret {
            config.secret = secret.clone();
        }
        if let Some(timeout) = args.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(min_score) = args.min_score {
            config.policy.min_score = min_score;
        }
        if let Some(ref action) = args.action {
            config.policy.action = action.clone();
        }

        Ok(config)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            timeout_secs: default_timeout_secs(),
            policy: PolicyDefaults::default(),
        }
    }
}

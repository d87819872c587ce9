//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults so the CLI works with no config file at all;
//! secrets (the odds API key) are referenced by env-var name in the config
//! and resolved at runtime via `std::env::var`.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub files: FilesConfig,
    pub odds_api: OddsApiConfig,
    pub strategy: StrategyConfig,
}

/// CSV file locations. CLI flags take precedence over these.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FilesConfig {
    pub odds: PathBuf,
    pub bets: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            odds: PathBuf::from("boxing_odds.csv"),
            bets: PathBuf::from("bets.csv"),
        }
    }
}

/// The Odds API settings for the `fetch-odds` subcommand.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OddsApiConfig {
    /// Env var holding the API key (never stored in the config itself).
    pub api_key_env: String,
    pub sport_key: String,
    /// Comma-separated betting regions.
    pub regions: String,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ODDS_API_KEY".to_string(),
            sport_key: "boxing_boxing".to_string(),
            regions: "us,uk,eu".to_string(),
        }
    }
}

/// Analyzer tuning.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StrategyConfig {
    /// Minimum (best − mean) / mean margin for a value bet.
    pub value_threshold: Decimal,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            value_threshold: dec!(0.05),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

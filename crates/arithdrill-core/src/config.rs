//! Drill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{DigitRange, Operator};

/// Top-level arithdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Operator used when none is given on the command line.
    #[serde(default = "default_operator")]
    pub operator: Operator,
    /// Problems per batch.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Fewest digits per operand.
    #[serde(default = "default_digits")]
    pub min_digits: u32,
    /// Most digits per operand.
    #[serde(default = "default_digits")]
    pub max_digits: u32,
    /// Output directory for exported results.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Export formats written after grading (csv, html, json).
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_operator() -> Operator {
    Operator::Add
}
fn default_count() -> usize {
    10
}
fn default_digits() -> u32 {
    1
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./arithdrill-results")
}
fn default_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            count: default_count(),
            min_digits: default_digits(),
            max_digits: default_digits(),
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

impl DrillConfig {
    /// The configured digit range, validated.
    pub fn range(&self) -> Result<DigitRange> {
        DigitRange::new(self.min_digits, self.max_digits)
            .context("invalid digit range in configuration")
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `arithdrill.toml` in the current directory
/// 2. `~/.config/arithdrill/config.toml`
///
/// Environment variable overrides: `ARITHDRILL_COUNT`, `ARITHDRILL_OPERATOR`.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("arithdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

fn apply_env_overrides(
    config: &mut DrillConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(count) = lookup("ARITHDRILL_COUNT") {
        config.count = count
            .trim()
            .parse()
            .with_context(|| format!("ARITHDRILL_COUNT is not a number: '{count}'"))?;
    }
    if let Some(op) = lookup("ARITHDRILL_OPERATOR") {
        config.operator = op.parse().context("invalid ARITHDRILL_OPERATOR")?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("arithdrill"))
}

//! Merge command-line flags over the loaded configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use arithdrill_core::config::{load_config_from, DrillConfig};
use arithdrill_core::model::{DigitRange, Operator};

use crate::DrillArgs;

/// Batch sizes accepted by the CLI.
pub const COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=100;

/// Validated settings for one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSettings {
    pub operator: Operator,
    pub range: DigitRange,
    pub count: usize,
}

pub fn load(config_path: Option<&Path>) -> Result<DrillConfig> {
    load_config_from(config_path)
}

/// Resolve batch settings: flags win over config values.
pub fn resolve_batch(args: &DrillArgs, config: &DrillConfig) -> Result<BatchSettings> {
    let operator = match &args.operator {
        Some(op) => op.parse::<Operator>().context("invalid --operator")?,
        None => config.operator,
    };

    let count = args.count.unwrap_or(config.count);
    anyhow::ensure!(
        COUNT_RANGE.contains(&count),
        "count must be between {} and {}, got {count}",
        COUNT_RANGE.start(),
        COUNT_RANGE.end()
    );

    let min_digits = args.min_digits.unwrap_or(config.min_digits);
    // A lone --min-digits above the configured max raises the max with it,
    // matching a form whose max field can never go below the min field.
    let max_digits = args
        .max_digits
        .unwrap_or_else(|| config.max_digits.max(min_digits));
    let range = DigitRange::new(min_digits, max_digits).context("invalid digit range")?;

    Ok(BatchSettings {
        operator,
        range,
        count,
    })
}

/// Resolve the export directory and format list.
pub fn resolve_exports(
    output: Option<PathBuf>,
    format: Option<String>,
    config: &DrillConfig,
) -> Result<(PathBuf, Vec<String>)> {
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let formats = match format {
        Some(f) => f.split(',').map(|s| s.trim().to_lowercase()).collect(),
        None => config.formats.clone(),
    };
    let formats = expand_formats(formats)?;
    Ok((output, formats))
}

fn expand_formats(formats: Vec<String>) -> Result<Vec<String>> {
    let mut expanded: Vec<String> = Vec::new();
    for fmt in formats {
        let names: &[&str] = match fmt.as_str() {
            "all" => &["csv", "html", "json"],
            "none" | "" => &[],
            "csv" => &["csv"],
            "html" => &["html"],
            "json" => &["json"],
            other => anyhow::bail!("unknown format '{other}' (expected csv, html, json, all, none)"),
        };
        for name in names {
            if !expanded.iter().any(|e| e == name) {
                expanded.push(name.to_string());
            }
        }
    }
    Ok(expanded)
}

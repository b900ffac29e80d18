//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.budgetstakes.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory report files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            verbose: false,
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}

/// Dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the school dataset CSV.
    #[serde(default = "default_data_file")]
    pub file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    "cps_budget_stakes_dataset.csv".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for percentage columns.
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: usize,

    /// Append the cohort totals row to CSV exports.
    #[serde(default)]
    pub include_totals_in_csv: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            percent_decimals: default_percent_decimals(),
            include_totals_in_csv: false,
        }
    }
}

fn default_percent_decimals() -> usize {
    1
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists
    /// but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".budgetstakes.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, and
    /// only override when an explicit value was provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.data.file = data.display().to_string();
        }

        if args.with_totals {
            self.report.include_totals_in_csv = true;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

//! Run configuration, loadable from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Report pipeline configuration.
///
/// Every field has a default, so a partial TOML file (or none at all)
/// works. The analysis window and asset universe are run metadata, fixed
/// per deployment rather than derived from the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory holding the four artifact slot files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory the rendered report pair is published into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Textual analysis window shown in report metadata.
    #[serde(default = "default_analysis_period")]
    pub analysis_period: String,

    /// Ordered ticker universe shown in report metadata.
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_analysis_period() -> String {
    "2015-07-01 to 2025-07-31".to_string()
}

fn default_assets() -> Vec<String> {
    vec!["TSLA".to_string(), "BND".to_string(), "SPY".to_string()]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            analysis_period: default_analysis_period(),
            assets: default_assets(),
        }
    }
}

impl ReportConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

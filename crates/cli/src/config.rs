//! Configuration file support for cleaning pipelines

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trfreq_core::{ReviseConfig, SortConfig};

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub revise: ReviseConfig,
}

impl PipelineConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match config_format(path)? {
            ConfigFormat::Yaml => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            ConfigFormat::Toml => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match config_format(path)? {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

enum ConfigFormat {
    Yaml,
    Toml,
}

fn config_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    match extension {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        _ => Err(anyhow::anyhow!(
            "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
            extension
        )),
    }
}

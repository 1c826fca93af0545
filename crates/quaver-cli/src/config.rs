use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub notation: NotationConfig,
    #[serde(default)]
    pub quantize: QuantizeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GenerateConfig {
    pub key: String,
    pub genre: String,
    pub length: usize,
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            key: "C".to_string(),
            genre: "pop".to_string(),
            length: 4,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct NotationConfig {
    /// Duration code for single-slice encoding
    pub duration: String,
    pub steps_per_quarter: u32,
}

impl Default for NotationConfig {
    fn default() -> Self {
        Self {
            duration: "w".to_string(),
            steps_per_quarter: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QuantizeConfig {
    pub scale: String,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            scale: "major".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub(crate) fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quaver")
        .join("config.toml")
}

/// Load the config file. A missing file gives defaults; an unreadable or
/// malformed one is an error.
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(&config_path())
}

pub(crate) fn load_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(parse_config(&s)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(s)
}

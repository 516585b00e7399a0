//! Declarative configuration loaded from JSON

use super::error::{LoggerError, Result};
use super::log_level::LevelSpec;
use super::output_config::OutputConfig;
use super::output_format::{DataFormat, TextFormatConfig};
use super::sink::Sink;
use super::style::parse_color;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whole-registry settings
///
/// # Example
///
/// ```
/// use log11::{Log, LogSettings};
///
/// let settings = LogSettings::from_json(r#"{
///     "levels": [{ "name": "AUDIT", "rank": 35, "color": "magenta" }],
///     "outputs": [
///         { "name": "console", "sink": "stderr", "level": "DEBUG" }
///     ]
/// }"#)?;
///
/// let log = Log::builder().no_project_root().build();
/// let logger = log.apply_settings(&settings)?;
/// logger.log("AUDIT", "configured");
/// # Ok::<(), log11::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Global level override applied after the outputs
    pub level: Option<LevelSpec>,
    pub levels: Vec<LevelSettings>,
    pub outputs: Vec<OutputSettings>,
}

impl LogSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A custom level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSettings {
    pub name: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LevelSettings {
    /// Parsed color, white when none is given
    pub fn color(&self) -> Result<Color> {
        match &self.color {
            None => Ok(Color::White),
            Some(name) => parse_color(name).ok_or_else(|| {
                LoggerError::other(format!(
                    "Unknown color '{}' for level '{}'",
                    name, self.name
                ))
            }),
        }
    }
}

fn default_format() -> String {
    DataFormat::Text.as_str().to_string()
}

/// One output; `sink` is `stdout`, `stderr` or a file path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub name: String,
    pub sink: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colored: Option<bool>,
    #[serde(default)]
    pub level: LevelSpec,
    #[serde(default)]
    pub text: TextFormatConfig,
    #[serde(default)]
    pub replace: bool,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl OutputSettings {
    pub fn to_config(&self) -> Result<OutputConfig> {
        let data_format: DataFormat = self.format.parse()?;
        let mut config = OutputConfig::new(&self.name, Sink::parse(&self.sink))
            .data_format(data_format)
            .level(self.level.clone())
            .text_format_config(self.text)
            .replace(self.replace);
        if let Some(colored) = self.colored {
            config = config.colored(colored);
        }
        for (key, value) in &self.options {
            config = config.option(key.clone(), value.clone());
        }
        Ok(config)
    }
}

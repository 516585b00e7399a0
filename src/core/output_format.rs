//! Record formatters
//!
//! Provides the two serializations an output can use:
//! - Text: one human-readable line built from the selected fields
//! - Json: one JSON object per line with extras merged at the top level

use super::error::{LoggerError, Result};
use super::field;
use super::log_record::LogRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Level column width when no registry is at hand (`CRITICAL`)
pub const DEFAULT_LEVEL_WIDTH: usize = 8;

/// Keys every JSON line carries before any extras
pub const RESERVED_JSON_KEYS: [&str; 5] = ["timestamp", "level", "message", "location", "function"];

const JSON_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Serialization used by an output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Human-readable text line (default)
    ///
    /// Example: `10:30:45 INFO     src/main.rs:12:main() Request processed user=42`
    #[default]
    Text,

    /// JSON object per line
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.000Z","level":"INFO","message":"Request processed",...}`
    Json,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Text => "text",
            DataFormat::Json => "json",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(DataFormat::Text),
            "json" => Ok(DataFormat::Json),
            _ => Err(LoggerError::invalid_format(s)),
        }
    }
}

/// Which fields appear in a text line
///
/// Field order is fixed: date, time, level, location, function, message, extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormatConfig {
    pub date: bool,
    pub time: bool,
    pub level: bool,
    pub location: bool,
    pub function: bool,
    pub message: bool,
    pub extras: bool,
}

impl TextFormatConfig {
    /// Every field enabled, including the date
    pub const fn all() -> Self {
        Self {
            date: true,
            time: true,
            level: true,
            location: true,
            function: true,
            message: true,
            extras: true,
        }
    }
}

impl Default for TextFormatConfig {
    /// Every field except the date
    fn default() -> Self {
        Self {
            date: false,
            ..Self::all()
        }
    }
}

/// Values the formatters need from the surrounding registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub level_width: usize,
    pub project_root: Option<PathBuf>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            level_width: DEFAULT_LEVEL_WIDTH,
            project_root: None,
        }
    }
}

/// Text line formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    config: TextFormatConfig,
    colored: bool,
    context: RenderContext,
}

impl TextFormat {
    pub fn new(config: TextFormatConfig, colored: bool) -> Self {
        Self {
            config,
            colored,
            context: RenderContext::default(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &TextFormatConfig {
        &self.config
    }

    pub fn colored(&self) -> bool {
        self.colored
    }

    /// Render one record as a newline-terminated line
    pub fn render(&self, record: &LogRecord) -> String {
        let config = &self.config;
        let colored = self.colored;
        let mut parts: Vec<String> = Vec::with_capacity(7);

        if config.date {
            parts.push(field::render_date(record, colored));
        }
        if config.time {
            parts.push(field::render_time(record, colored));
        }
        if config.level {
            parts.push(field::render_level(record, self.context.level_width, colored));
        }
        match (config.location, config.function) {
            (true, true) => parts.push(format!(
                "{}:{}",
                field::render_location(record, self.context.project_root.as_deref(), colored),
                field::render_function(record)
            )),
            (true, false) => parts.push(field::render_location(
                record,
                self.context.project_root.as_deref(),
                colored,
            )),
            (false, true) => parts.push(field::render_function(record)),
            (false, false) => {}
        }
        if config.message {
            parts.push(field::render_message(record, colored));
        }
        if config.extras && !record.extras.is_empty() {
            parts.push(field::render_extras(record, colored));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }
}

/// JSON-lines formatter
///
/// Extras are merged into the top-level object after the reserved keys. An
/// extra whose key equals a reserved key overwrites that reserved value; the
/// key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFormat {
    context: RenderContext,
}

impl JsonFormat {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    /// Build the JSON object for a record
    pub fn to_value(&self, record: &LogRecord) -> serde_json::Value {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(record.timestamp.format(JSON_TIMESTAMP_FORMAT).to_string()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.name().to_string()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        json_obj.insert(
            "location".to_string(),
            serde_json::Value::String(field::location_text(
                record,
                self.context.project_root.as_deref(),
            )),
        );
        json_obj.insert(
            "function".to_string(),
            serde_json::Value::String(
                record
                    .function
                    .clone()
                    .unwrap_or_else(|| field::MISSING.to_string()),
            ),
        );

        for (key, value) in record.extras.iter() {
            json_obj.insert(key.to_string(), value.to_json_value());
        }

        serde_json::Value::Object(json_obj)
    }

    /// Render one record as a newline-terminated JSON line
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        let mut line = serde_json::to_string(&self.to_value(record))
            .map_err(|e| LoggerError::format("JSON", e.to_string()))?;
        line.push('\n');
        Ok(line)
    }
}

/// Formatter chosen for an output at configuration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatter {
    Text(TextFormat),
    Json(JsonFormat),
}

impl Formatter {
    pub fn render(&self, record: &LogRecord) -> Result<String> {
        match self {
            Formatter::Text(format) => Ok(format.render(record)),
            Formatter::Json(format) => format.render(record),
        }
    }

    pub fn data_format(&self) -> DataFormat {
        match self {
            Formatter::Text(_) => DataFormat::Text,
            Formatter::Json(_) => DataFormat::Json,
        }
    }
}

//! Configuration of a single named output

use super::error::{LoggerError, Result};
use super::log_level::LevelSpec;
use super::output_format::{DataFormat, TextFormatConfig};
use super::sink::Sink;
use crate::appenders::FileOptions;
use std::fs;

/// Extra options understood by outputs
pub const KNOWN_OPTIONS: [&str; 2] = ["buffered", "delay"];

/// A sink paired with its format, level threshold and styling
///
/// # Example
///
/// ```
/// use log11::{DataFormat, OutputConfig, Sink};
///
/// let config = OutputConfig::new("audit", Sink::file("logs/audit.jsonl"))
///     .data_format(DataFormat::Json)
///     .level("WARNING");
/// assert_eq!(config.name(), "audit");
/// ```
#[derive(Debug, Clone)]
pub struct OutputConfig {
    name: String,
    sink: Sink,
    data_format: DataFormat,
    colored: Option<bool>,
    level: LevelSpec,
    text_format_config: TextFormatConfig,
    replace: bool,
    auto_apply: bool,
    extra_options: serde_json::Map<String, serde_json::Value>,
}

impl OutputConfig {
    pub fn new(name: impl Into<String>, sink: Sink) -> Self {
        Self {
            name: name.into(),
            sink,
            data_format: DataFormat::default(),
            colored: None,
            level: LevelSpec::default(),
            text_format_config: TextFormatConfig::default(),
            replace: false,
            auto_apply: true,
            extra_options: serde_json::Map::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn data_format(mut self, data_format: DataFormat) -> Self {
        self.data_format = data_format;
        self
    }

    /// Force colors on or off; see [`OutputConfig::is_colored`] for the default
    #[must_use = "builder methods return a new value"]
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = Some(colored);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<LevelSpec>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn text_format_config(mut self, config: TextFormatConfig) -> Self {
        self.text_format_config = config;
        self
    }

    /// Replace an existing output of the same name instead of failing
    #[must_use = "builder methods return a new value"]
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Re-install live sinks as soon as the registry changes (default `true`)
    #[must_use = "builder methods return a new value"]
    pub fn auto_apply(mut self, auto_apply: bool) -> Self {
        self.auto_apply = auto_apply;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra_options.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn format(&self) -> DataFormat {
        self.data_format
    }

    /// Effective color setting
    ///
    /// JSON is never colored. Text defaults to colored on console sinks and
    /// plain everywhere else.
    pub fn is_colored(&self) -> bool {
        match self.data_format {
            DataFormat::Json => false,
            DataFormat::Text => self.colored.unwrap_or_else(|| self.sink.is_console()),
        }
    }

    pub fn level_spec(&self) -> &LevelSpec {
        &self.level
    }

    pub fn text_config(&self) -> &TextFormatConfig {
        &self.text_format_config
    }

    pub fn replaces(&self) -> bool {
        self.replace
    }

    pub fn auto_applies(&self) -> bool {
        self.auto_apply
    }

    pub fn extra_options(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra_options
    }

    /// File handling derived from the extra options
    pub fn file_options(&self) -> Result<FileOptions> {
        let mut options = FileOptions::default();
        for (key, value) in &self.extra_options {
            let flag = value.as_bool().ok_or_else(|| {
                LoggerError::invalid_option(&self.name, key, "expected a boolean")
            })?;
            match key.as_str() {
                "buffered" => options.buffered = flag,
                "delay" => options.delay = flag,
                _ => {
                    return Err(LoggerError::invalid_option(
                        &self.name,
                        key,
                        format!("unknown option, expected one of {:?}", KNOWN_OPTIONS),
                    ))
                }
            }
        }
        Ok(options)
    }

    /// Check everything that can be checked without touching the level registry
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::invalid_sink(&self.name, "output name must not be empty"));
        }
        self.file_options()?;

        if let Sink::File(path) = &self.sink {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::invalid_sink(&self.name, "empty file path"));
            }
            if path.is_dir() {
                return Err(LoggerError::invalid_sink(
                    &self.name,
                    format!("'{}' is a directory", path.display()),
                ));
            }
            // Missing directories are created when the sink opens; here only
            // the closest existing ancestor is checked.
            let existing = path
                .ancestors()
                .skip(1)
                .filter(|p| !p.as_os_str().is_empty())
                .find(|p| p.exists());
            if let Some(ancestor) = existing {
                let meta = fs::metadata(ancestor).map_err(|e| {
                    LoggerError::invalid_sink(
                        &self.name,
                        format!("cannot inspect '{}': {}", ancestor.display(), e),
                    )
                })?;
                if !meta.is_dir() {
                    return Err(LoggerError::invalid_sink(
                        &self.name,
                        format!("'{}' is not a directory", ancestor.display()),
                    ));
                }
                if meta.permissions().readonly() {
                    return Err(LoggerError::invalid_sink(
                        &self.name,
                        format!("directory '{}' is not writable", ancestor.display()),
                    ));
                }
            }
        }
        Ok(())
    }
}

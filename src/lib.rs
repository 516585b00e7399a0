//! # log11
//!
//! A small structured logging library built around a registry of named
//! outputs. Each output pairs a sink (console, file, stream or callable) with
//! a data format (colored text or JSON lines), a level threshold and a field
//! selection.
//!
//! ## Features
//!
//! - **Named outputs**: add, replace and remove outputs at runtime
//! - **Custom levels**: register levels by name and rank next to the built-ins
//! - **Two wire formats**: aligned, optionally colored text and JSON lines
//! - **Isolated sinks**: a failing sink never stops the others
//! - **Zero config**: [`get_logger`] falls back to colored text on stdout
//!
//! ```
//! use log11::{DataFormat, Log, OutputConfig, Sink};
//!
//! let log = Log::builder().no_project_root().build();
//! log.add_output(
//!     OutputConfig::new("events", Sink::stream(Vec::new()))
//!         .data_format(DataFormat::Json)
//!         .level("DEBUG"),
//! )?;
//!
//! let logger = log.apply()?;
//! log11::info!(logger, "Listening"; port = 8080);
//! # Ok::<(), log11::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        get_logger, CallSite, DataFormat, Extras, FieldValue, Level, LevelSpec, Log, LogSettings,
        Logger, LoggerError, LoggerMetrics, OutputConfig, Result, Sink, TextFormatConfig,
    };
    pub use crate::{critical, debug, error, extras, info, success, trace, warning};
}

pub use crate::appenders::{CallableAppender, ConsoleAppender, FileAppender, FileOptions, StreamAppender};
pub use crate::core::{
    get_logger, parse_color, Appender, CallSite, DataFormat, Extras, FieldValue, Formatter,
    JsonFormat, Level, LevelRegistry, LevelSettings, LevelSpec, LiveOutput, Log, LogBuilder,
    LogRecord, LogSettings, Logger, LoggerError, LoggerMetrics, OutputConfig, OutputSettings,
    RenderContext, Result, SharedWriter, Sink, SinkFn, TextFormat, TextFormatConfig,
    DEFAULT_OUTPUT,
};
pub use colored::Color;

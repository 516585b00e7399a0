//! Core logger types and traits

pub mod appender;
pub mod dispatch;
pub mod error;
pub mod extras;
pub mod field;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_config;
pub mod output_format;
pub mod project_root;
pub mod registry;
pub mod settings;
pub mod sink;
pub mod style;

pub use appender::Appender;
pub use dispatch::LiveOutput;
pub use error::{LoggerError, Result};
pub use extras::{Extras, FieldValue};
pub use log_level::{Level, LevelRegistry, LevelSpec};
pub use log_record::LogRecord;
pub use logger::{get_logger, CallSite, Logger};
pub use metrics::LoggerMetrics;
pub use output_config::OutputConfig;
pub use output_format::{DataFormat, Formatter, JsonFormat, RenderContext, TextFormat, TextFormatConfig};
pub use registry::{Log, LogBuilder, DEFAULT_OUTPUT};
pub use settings::{LevelSettings, LogSettings, OutputSettings};
pub use sink::{SharedWriter, Sink, SinkFn};
pub use style::{parse_color, Style};

//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level with this name is already registered
    #[error("Log level '{name}' already exists")]
    DuplicateLevel { name: String },

    /// Level name not found in the registry
    #[error("Unknown log level '{name}'")]
    UnknownLevel { name: String },

    /// Data format other than text or json
    #[error("Invalid data format '{format}': expected 'text' or 'json'")]
    InvalidFormat { format: String },

    /// Sink cannot be written to
    #[error("Invalid sink for output '{output}': {message}")]
    InvalidSink { output: String, message: String },

    /// Output name not present in the registry
    #[error("Unknown log output '{name}'")]
    UnknownOutput { name: String },

    /// Output name already registered and `replace` was not requested
    #[error("Log output '{name}' already exists")]
    DuplicateOutput { name: String },

    /// Unknown or ill-typed extra option on an output
    #[error("Invalid option '{key}' for output '{output}': {message}")]
    InvalidOption {
        output: String,
        key: String,
        message: String,
    },

    /// A synchronous write to a sink failed
    #[error("Write to sink '{sink}' failed: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// A field or record failed to render
    #[error("Formatter error ({format_type}): {message}")]
    Format {
        format_type: String,
        message: String,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    pub fn duplicate_level(name: impl Into<String>) -> Self {
        LoggerError::DuplicateLevel { name: name.into() }
    }

    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    pub fn invalid_format(format: impl Into<String>) -> Self {
        LoggerError::InvalidFormat {
            format: format.into(),
        }
    }

    /// Create an invalid sink error for the named output
    pub fn invalid_sink(output: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidSink {
            output: output.into(),
            message: message.into(),
        }
    }

    pub fn unknown_output(name: impl Into<String>) -> Self {
        LoggerError::UnknownOutput { name: name.into() }
    }

    pub fn duplicate_output(name: impl Into<String>) -> Self {
        LoggerError::DuplicateOutput { name: name.into() }
    }

    /// Create an invalid option error
    pub fn invalid_option(
        output: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::InvalidOption {
            output: output.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error with the failing IO cause
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create a formatter error
    pub fn format(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Format {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// True for errors raised by the configuration API
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::DuplicateLevel { .. }
                | LoggerError::UnknownLevel { .. }
                | LoggerError::InvalidFormat { .. }
                | LoggerError::InvalidSink { .. }
                | LoggerError::UnknownOutput { .. }
                | LoggerError::DuplicateOutput { .. }
                | LoggerError::InvalidOption { .. }
        )
    }
}

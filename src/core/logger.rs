//! Logger handle
//!
//! A [`Logger`] is a cheap clone of the registry it came from. Every call
//! builds a [`LogRecord`] and hands it to the sinks live at that moment.

use super::error::Result;
use super::extras::Extras;
use super::log_level::{CRITICAL, DEBUG, ERROR, INFO, SUCCESS, TRACE, WARNING};
use super::log_record::LogRecord;
use super::registry::Log;
use std::panic::Location;

/// Where a record was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl CallSite {
    /// The caller of the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
            function: None,
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: &'static str) -> Self {
        self.function = Some(function);
        self
    }
}

/// Handle exposing one method per level
///
/// # Example
///
/// ```
/// use log11::{Extras, Log, OutputConfig, Sink};
///
/// let log = Log::builder().no_project_root().build();
/// log.add_output(OutputConfig::new("memory", Sink::stream(Vec::new())))?;
///
/// let logger = log.logger();
/// logger.info("Server started");
/// logger.warning_with_extras("Slow request", Extras::new().with_field("ms", 1250));
/// logger.log("SUCCESS", "Deployed");
/// # Ok::<(), log11::LoggerError>(())
/// ```
#[derive(Clone)]
pub struct Logger {
    log: Log,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn new(log: Log) -> Self {
        Self { log }
    }

    /// The registry this handle dispatches through
    pub fn registry(&self) -> &Log {
        &self.log
    }

    /// Log at any registered level, by name
    ///
    /// An unknown level is reported on stderr and the record is dropped.
    #[track_caller]
    pub fn log(&self, level: &str, message: impl AsRef<str>) {
        self.report(self.try_log_at(level, message, Extras::new(), CallSite::caller()));
    }

    #[track_caller]
    pub fn log_with_extras(&self, level: &str, message: impl AsRef<str>, extras: Extras) {
        self.report(self.try_log_at(level, message, extras, CallSite::caller()));
    }

    /// Like [`Logger::log`], but returns the unknown-level error
    #[track_caller]
    pub fn try_log(&self, level: &str, message: impl AsRef<str>, extras: Extras) -> Result<()> {
        self.try_log_at(level, message, extras, CallSite::caller())
    }

    /// Log with an explicit call site; used by the macros
    pub fn log_at(&self, level: &str, message: impl AsRef<str>, extras: Extras, site: CallSite) {
        self.report(self.try_log_at(level, message, extras, site));
    }

    fn try_log_at(
        &self,
        level: &str,
        message: impl AsRef<str>,
        extras: Extras,
        site: CallSite,
    ) -> Result<()> {
        let level = self.log.resolve_level(level)?;
        let mut record = LogRecord::new(level, message)
            .with_location(site.file, site.line)
            .with_extras(extras);
        if let Some(function) = site.function {
            record = record.with_function(function);
        }
        self.log.dispatch(&record);
        Ok(())
    }

    fn report(&self, result: Result<()>) {
        if let Err(e) = result {
            eprintln!("[LOGGER ERROR] {}", e);
        }
    }

    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log_at(TRACE, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log_at(DEBUG, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log_at(INFO, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn success(&self, message: impl AsRef<str>) {
        self.log_at(SUCCESS, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log_at(WARNING, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log_at(ERROR, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.log_at(CRITICAL, message, Extras::new(), CallSite::caller());
    }

    #[track_caller]
    pub fn trace_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(TRACE, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn debug_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(DEBUG, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn info_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(INFO, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn success_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(SUCCESS, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn warning_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(WARNING, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn error_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(ERROR, message, extras, CallSite::caller());
    }

    #[track_caller]
    pub fn critical_with_extras(&self, message: impl AsRef<str>, extras: Extras) {
        self.log_at(CRITICAL, message, extras, CallSite::caller());
    }

    /// Flush every live sink
    pub fn flush(&self) -> Result<()> {
        self.log.flush()
    }
}

/// Logger on the process-wide registry, set up with defaults on first use
pub fn get_logger() -> Logger {
    Log::global().get_logger()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output_config::OutputConfig;
    use crate::core::output_format::DataFormat;
    use crate::core::sink::Sink;
    use crate::core::LoggerError;
    use colored::Color;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capture(log: &Log, format: DataFormat) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        log.add_output(
            OutputConfig::new("capture", Sink::callable(move |line| {
                sink_seen.lock().push(line.to_string());
                Ok(())
            }))
            .data_format(format)
            .level("TRACE"),
        )
        .unwrap();
        seen
    }

    fn isolated() -> Log {
        Log::builder().no_project_root().build()
    }

    #[test]
    fn test_level_methods_reach_sink() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        let logger = log.logger();

        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.success("s");
        logger.warning("w");
        logger.error("e");
        logger.critical("c");

        let levels: Vec<String> = seen
            .lock()
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["level"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            levels,
            vec!["TRACE", "DEBUG", "INFO", "SUCCESS", "WARNING", "ERROR", "CRITICAL"]
        );
    }

    #[test]
    fn test_caller_location_recorded() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        let line = line!() + 1;
        log.logger().info("here");

        let value: serde_json::Value = serde_json::from_str(&seen.lock()[0]).unwrap();
        assert_eq!(
            value["location"].as_str().unwrap(),
            format!("{}:{}", file!(), line)
        );
    }

    #[test]
    fn test_extras_forwarded() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        log.logger()
            .info_with_extras("login", Extras::new().with_field("user_id", 7));

        let value: serde_json::Value = serde_json::from_str(&seen.lock()[0]).unwrap();
        assert_eq!(value["user_id"], 7);
    }

    #[test]
    fn test_unknown_level() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        let logger = log.logger();

        logger.log("LOUD", "dropped");
        assert!(seen.lock().is_empty());

        let err = logger.try_log("LOUD", "dropped", Extras::new()).unwrap_err();
        assert!(matches!(err, LoggerError::UnknownLevel { .. }));
    }

    #[test]
    fn test_custom_level_by_name() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        log.add_level("AUDIT", 35, Color::Magenta).unwrap();

        log.logger().log("audit", "who did what");
        let value: serde_json::Value = serde_json::from_str(&seen.lock()[0]).unwrap();
        assert_eq!(value["level"], "AUDIT");
    }

    #[test]
    fn test_explicit_call_site_function() {
        let log = isolated();
        let seen = capture(&log, DataFormat::Json);
        let site = CallSite {
            file: "src/auth.rs",
            line: 42,
            function: Some("login"),
        };
        log.logger().log_at(INFO, "ok", Extras::new(), site);

        let value: serde_json::Value = serde_json::from_str(&seen.lock()[0]).unwrap();
        assert_eq!(value["location"], "src/auth.rs:42");
        assert_eq!(value["function"], "login");
    }
}

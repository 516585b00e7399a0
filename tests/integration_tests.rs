//! Integration tests for the output registry
//!
//! These tests verify:
//! - Level filtering per output and through the global override
//! - Text and JSON wire formats on real sinks
//! - Sink isolation when one output fails
//! - Registry semantics: duplicates, replace, remove, apply, rollback
//! - Zero-config behavior and declarative settings

use log11::{
    info, warning, Color, DataFormat, Extras, LevelSpec, Log, LogSettings, LoggerError,
    OutputConfig, Sink, TextFormatConfig,
};
use parking_lot::Mutex;
use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory writer whose contents stay readable after being handed to a sink
#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf-8 output")
    }

    fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn isolated() -> Log {
    Log::builder().no_project_root().build()
}

fn plain_text(name: &str, sink: Sink) -> OutputConfig {
    OutputConfig::new(name, sink)
        .data_format(DataFormat::Text)
        .colored(false)
}

#[test]
fn test_json_stream_filters_below_threshold() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(
        OutputConfig::new("json", Sink::stream(buffer.clone()))
            .data_format(DataFormat::Json)
            .level("INFO"),
    )
    .expect("add json output");

    let logger = log.apply().expect("apply");
    logger.debug("hidden");
    logger.info_with_extras(
        "User logged in",
        Extras::new().with_field("user_id", 123).with_field("action", "login"),
    );

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1);

    let value: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid json");
    let keys: Vec<&str> = value
        .as_object()
        .expect("json object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec!["timestamp", "level", "message", "location", "function", "user_id", "action"]
    );
    assert_eq!(value["level"], "INFO");
    assert_eq!(value["message"], "User logged in");
    assert_eq!(value["user_id"], 123);
    assert_eq!(value["action"], "login");

    let timestamp = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").unwrap();
    assert!(timestamp.is_match(value["timestamp"].as_str().unwrap()));
}

#[test]
fn test_json_extras_overwrite_reserved_keys() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(
        OutputConfig::new("json", Sink::stream(buffer.clone())).data_format(DataFormat::Json),
    )
    .unwrap();

    log.logger()
        .info_with_extras("original", Extras::new().with_field("message", "override"));

    let value: serde_json::Value = serde_json::from_str(&buffer.lines()[0]).unwrap();
    assert_eq!(value["message"], "override");
    assert_eq!(value.as_object().unwrap().len(), 5);
}

#[test]
fn test_duplicate_output_and_replace() {
    let log = isolated();
    let first = Buffer::default();
    let second = Buffer::default();

    log.add_output(plain_text("main", Sink::stream(first.clone())))
        .unwrap();
    let err = log
        .add_output(plain_text("main", Sink::stream(second.clone())))
        .unwrap_err();
    assert!(matches!(err, LoggerError::DuplicateOutput { .. }));

    log.add_output(plain_text("main", Sink::stream(second.clone())).replace(true))
        .unwrap();
    log.logger().info("after replace");

    assert_eq!(log.outputs(), vec!["main"]);
    assert!(first.contents().is_empty());
    assert_eq!(second.lines().len(), 1);
}

#[test]
fn test_failing_callable_does_not_block_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("isolated.log");
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let log = isolated();
    log.add_output(OutputConfig::new(
        "raising",
        Sink::callable(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::other("callable refused the record"))
        }),
    ))
    .unwrap();
    log.add_output(OutputConfig::new(
        "panicking",
        Sink::callable(|_| panic!("callable exploded")),
    ))
    .unwrap();
    log.add_output(plain_text("file", Sink::file(&log_file)))
        .unwrap();

    let logger = log.logger();
    logger.error("first");
    logger.error("second");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(log.metrics().failed_count(), 4);
    assert_eq!(log.metrics().delivered_count(), 2);
}

#[test]
fn test_zero_config_writes_one_line_to_console() {
    let console = Buffer::default();
    let log = Log::builder()
        .no_project_root()
        .console(console.clone())
        .build();

    let logger = log.get_logger();
    assert_eq!(log.outputs(), vec![log11::DEFAULT_OUTPUT]);

    let live = log.live_outputs();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].sink, "stdout");
    assert_eq!(live[0].threshold, 20);
    assert!(live[0].colored);

    logger.debug("not shown");
    logger.info("hello");

    let lines = console.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("hello"));
    assert!(lines[0].contains("\x1b["));
}

#[test]
fn test_get_logger_keeps_existing_outputs() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(plain_text("mine", Sink::stream(buffer.clone())))
        .unwrap();

    log.get_logger().info("routed");
    assert_eq!(log.outputs(), vec!["mine"]);
    assert_eq!(buffer.lines().len(), 1);
}

#[test]
fn test_apply_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let log = isolated();
    log.add_output(plain_text("file", Sink::file(temp_dir.path().join("a.log"))))
        .unwrap();
    log.add_output(
        OutputConfig::new("json", Sink::stream(io::sink()))
            .data_format(DataFormat::Json)
            .level("ERROR"),
    )
    .unwrap();

    log.apply().unwrap();
    let first = log.live_outputs();
    log.apply().unwrap();
    log.apply().unwrap();

    assert_eq!(log.live_outputs(), first);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_custom_level() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_level("NOTICE", 22, Color::Cyan).unwrap();
    log.add_output(
        OutputConfig::new("notices", Sink::stream(buffer.clone()))
            .data_format(DataFormat::Json)
            .level("notice"),
    )
    .unwrap();

    let logger = log.logger();
    logger.info("below");
    logger.log("NOTICE", "at");
    logger.warning("above");

    let levels: Vec<String> = buffer
        .lines()
        .iter()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["level"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(levels, vec!["NOTICE", "WARNING"]);

    assert!(matches!(
        log.add_level("notice", 23, Color::Red).unwrap_err(),
        LoggerError::DuplicateLevel { .. }
    ));
}

#[test]
fn test_long_custom_level_widens_column() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(
        plain_text("text", Sink::stream(buffer.clone())).text_format_config(TextFormatConfig {
            time: false,
            location: false,
            function: false,
            ..TextFormatConfig::default()
        }),
    )
    .unwrap();
    log.add_level("ANNOUNCEMENT", 45, Color::Magenta).unwrap();

    let logger = log.logger();
    logger.info("short");
    logger.log("ANNOUNCEMENT", "long");

    assert_eq!(
        buffer.lines(),
        vec!["INFO         short", "ANNOUNCEMENT long"]
    );
}

#[test]
fn test_text_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("app.log");

    let log = isolated();
    log.add_output(plain_text("file", Sink::file(&log_file)))
        .unwrap();

    let logger = log.logger();
    info!(logger, "Extras test"; value = 42, empty = "", nan_value = f64::NAN);
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let pattern = Regex::new(
        r"^\d{2}:\d{2}:\d{2} INFO     tests/integration_tests\.rs:\d+:test_text_file_output\(\) Extras test value=42 empty=_EMPTY_ nan_value=_NAN_\n$",
    )
    .unwrap();
    assert!(pattern.is_match(&content), "unexpected line: {:?}", content);
}

#[test]
fn test_log_injection_prevention() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(plain_text("text", Sink::stream(buffer.clone())))
        .unwrap();

    log.logger()
        .info("User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
    assert!(lines[0].contains("\\n"));
}

#[test]
fn test_global_level_and_clear() {
    let log = isolated();
    let buffer = Buffer::default();
    log.add_output(plain_text("text", Sink::stream(buffer.clone())).level("DEBUG"))
        .unwrap();

    let logger = log.logger();
    log.set_global_level("ERROR").unwrap();
    warning!(logger, "suppressed");
    assert!(buffer.lines().is_empty());

    log.clear_global_level().unwrap();
    warning!(logger, "delivered");
    assert_eq!(buffer.lines().len(), 1);

    log.set_global_level("ERROR").unwrap();
    log.clear();
    assert_eq!(log.global_level(), None);
    assert!(log.outputs().is_empty());

    logger.critical("no sinks");
    assert_eq!(buffer.lines().len(), 1);
}

#[test]
fn test_date_field_is_off_by_default() {
    assert!(!TextFormatConfig::default().date);
    assert!(TextFormatConfig::all().date);

    let log = isolated();
    let without_date = Buffer::default();
    let with_date = Buffer::default();
    log.add_output(plain_text("default", Sink::stream(without_date.clone())))
        .unwrap();
    log.add_output(
        plain_text("dated", Sink::stream(with_date.clone()))
            .text_format_config(TextFormatConfig::all()),
    )
    .unwrap();

    log.logger().info("when");

    let date = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} ").unwrap();
    let time = Regex::new(r"^\d{2}:\d{2}:\d{2} INFO").unwrap();
    assert!(date.is_match(&with_date.contents()));
    assert!(time.is_match(&without_date.contents()));
}

#[test]
fn test_invalid_output_leaves_registry_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let log = isolated();
    log.add_output(plain_text("good", Sink::stream(io::sink())))
        .unwrap();
    let before = log.live_outputs();

    let err = log
        .add_output(plain_text("bad", Sink::file(temp_dir.path())))
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidSink { .. }));
    assert!(err.is_configuration());

    let err = log
        .add_output(plain_text("loud", Sink::stream(io::sink())).level("LOUD"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::UnknownLevel { .. }));

    assert_eq!(log.outputs(), vec!["good"]);
    assert_eq!(log.live_outputs(), before);
}

/// Replace the directory holding `path` with a plain file so reopening fails
fn block_parent(path: &std::path::Path) {
    let parent = path.parent().unwrap();
    fs::remove_dir_all(parent).unwrap();
    fs::write(parent, "not a directory").unwrap();
}

#[test]
fn test_failed_rebuild_keeps_previous_sinks() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("sub").join("app.log");
    let log = isolated();
    log.add_output(plain_text("f", Sink::file(&log_file))).unwrap();
    log.add_output(plain_text("other", Sink::stream(io::sink())))
        .unwrap();
    let before = log.live_outputs();
    block_parent(&log_file);

    let err = log
        .add_output(plain_text("extra", Sink::stream(io::sink())))
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidSink { .. }));
    assert_eq!(log.outputs(), vec!["f", "other"]);
    assert_eq!(log.live_outputs(), before);

    let err = log
        .add_output(plain_text("other", Sink::stream(io::sink())).level("ERROR").replace(true))
        .unwrap_err();
    assert!(matches!(err, LoggerError::InvalidSink { .. }));
    assert_eq!(log.output("other").unwrap().level_spec(), &LevelSpec::from("INFO"));
    assert_eq!(log.live_outputs(), before);

    let err = log.remove_output("other").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidSink { .. }));
    assert_eq!(log.outputs(), vec!["f", "other"]);
    assert_eq!(log.live_outputs(), before);
}

#[test]
fn test_rejected_output_creates_no_directories() {
    let temp_dir = TempDir::new().unwrap();
    let log = isolated();
    log.add_output(plain_text("f", Sink::file(temp_dir.path().join("app.log"))))
        .unwrap();

    let nested = temp_dir.path().join("never").join("app.log");
    let err = log.add_output(plain_text("f", Sink::file(&nested))).unwrap_err();
    assert!(matches!(err, LoggerError::DuplicateOutput { .. }));

    let err = log
        .add_output(plain_text("g", Sink::file(&nested)).level("LOUD"))
        .unwrap_err();
    assert!(matches!(err, LoggerError::UnknownLevel { .. }));

    assert!(!temp_dir.path().join("never").exists());

    log.add_output(plain_text("g", Sink::file(&nested))).unwrap();
    assert!(temp_dir.path().join("never").is_dir());
}

#[test]
fn test_callable_logging_through_its_own_registry() {
    let log = isolated();
    let buffer = Buffer::default();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let inner = log.clone();
    let collected = Arc::clone(&seen);
    log.add_output(plain_text(
        "callback",
        Sink::callable(move |line| {
            if line.contains("outer") {
                inner.logger().info("nested");
            }
            collected.lock().push(line.to_string());
            Ok(())
        }),
    ))
    .unwrap();
    log.add_output(plain_text("memory", Sink::stream(buffer.clone())))
        .unwrap();

    log.logger().info("outer");

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("outer"));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("nested"));
    assert!(lines[1].contains("outer"));
    assert_eq!(log.metrics().failed_count(), 1);
}

#[test]
fn test_remove_output() {
    let log = isolated();
    let kept = Buffer::default();
    let removed = Buffer::default();
    log.add_output(plain_text("kept", Sink::stream(kept.clone())))
        .unwrap();
    log.add_output(plain_text("removed", Sink::stream(removed.clone())))
        .unwrap();

    log.remove_output("removed").unwrap();
    log.logger().info("only one");

    assert_eq!(kept.lines().len(), 1);
    assert!(removed.lines().is_empty());
    assert!(matches!(
        log.remove_output("removed").unwrap_err(),
        LoggerError::UnknownOutput { .. }
    ));
}

#[test]
fn test_buffered_file_needs_flush() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("buffered.log");
    let log = isolated();
    log.add_output(plain_text("file", Sink::file(&log_file)).option("buffered", true))
        .unwrap();

    let logger = log.logger();
    logger.info("held back");
    assert!(fs::read_to_string(&log_file).unwrap().is_empty());

    logger.flush().unwrap();
    assert_eq!(fs::read_to_string(&log_file).unwrap().lines().count(), 1);
}

#[test]
fn test_delayed_file_created_on_first_record() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("delayed.log");
    let log = isolated();
    log.add_output(plain_text("file", Sink::file(&log_file)).option("delay", true))
        .unwrap();

    log.logger().debug("filtered");
    assert!(!log_file.exists());

    log.logger().info("opens the file");
    assert!(log_file.exists());
}

#[test]
fn test_settings_from_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("settings.jsonl");
    let json = serde_json::json!({
        "levels": [{ "name": "AUDIT", "rank": 35, "color": "light-magenta" }],
        "outputs": [
            {
                "name": "audit",
                "sink": log_file.display().to_string(),
                "format": "json",
                "level": "AUDIT"
            }
        ]
    })
    .to_string();

    let log = isolated();
    let settings = LogSettings::from_json(&json).unwrap();
    let logger = log.apply_settings(&settings).unwrap();

    logger.warning("below threshold");
    logger.log("AUDIT", "recorded");
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(value["level"], "AUDIT");

    // Outputs without `replace` cannot be applied twice
    let err = log.apply_settings(&settings).unwrap_err();
    assert!(matches!(err, LoggerError::DuplicateOutput { .. }));
}

#[test]
fn test_settings_with_bad_format_change_nothing() {
    let log = isolated();
    let settings = LogSettings::from_json(
        r#"{"outputs": [
            {"name": "ok", "sink": "stderr"},
            {"name": "bad", "sink": "stderr", "format": "yaml"}
        ]}"#,
    )
    .unwrap();

    let err = log.apply_settings(&settings).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidFormat { .. }));
    assert!(log.outputs().is_empty());
}

#[test]
fn test_global_get_logger() {
    let logger = log11::get_logger();
    assert!(!Log::global().outputs().is_empty());
    logger.flush().unwrap();
}

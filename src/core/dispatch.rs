//! Live sink set and record delivery
//!
//! A [`SinkSet`] is built from the registry in one go and swapped in whole.
//! Each installed sink owns its filter threshold, formatter and appender.

use super::appender::Appender;
use super::error::Result;
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use super::output_config::OutputConfig;
use super::output_format::{DataFormat, Formatter, JsonFormat, RenderContext, TextFormat};
use super::sink::{SharedWriter, Sink};
use crate::appenders::{CallableAppender, ConsoleAppender, FileAppender, StreamAppender};
use crate::core::LoggerError;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    /// Sinks the current thread is writing to, by address
    static DELIVERING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a sink as busy on this thread until dropped
struct DeliveryGuard {
    id: usize,
}

impl DeliveryGuard {
    /// `None` when this thread is already inside `sink`
    fn enter(sink: &InstalledSink) -> Option<Self> {
        let id = sink as *const InstalledSink as usize;
        DELIVERING.with(|busy| {
            let mut busy = busy.borrow_mut();
            if busy.contains(&id) {
                None
            } else {
                busy.push(id);
                Some(Self { id })
            }
        })
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        DELIVERING.with(|busy| busy.borrow_mut().retain(|&id| id != self.id));
    }
}

/// Snapshot of one installed sink, for inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveOutput {
    pub name: String,
    pub sink: String,
    pub data_format: DataFormat,
    pub threshold: u32,
    pub colored: bool,
}

pub(crate) struct InstalledSink {
    name: String,
    sink: String,
    threshold: u32,
    formatter: Formatter,
    appender: Mutex<Box<dyn Appender>>,
}

impl InstalledSink {
    /// Open the write target for `config`
    ///
    /// `console` replaces the process stdout for [`Sink::Stdout`].
    pub(crate) fn open(
        config: &OutputConfig,
        threshold: u32,
        context: &RenderContext,
        console: Option<&SharedWriter>,
    ) -> Result<Self> {
        let appender: Box<dyn Appender> = match config.sink() {
            Sink::Stdout => match console {
                Some(writer) => Box::new(StreamAppender::new(Arc::clone(writer))),
                None => Box::new(ConsoleAppender::stdout()),
            },
            Sink::Stderr => Box::new(ConsoleAppender::stderr()),
            Sink::File(path) => Box::new(
                FileAppender::open(path, config.file_options()?)
                    .map_err(|e| LoggerError::invalid_sink(config.name(), e.to_string()))?,
            ),
            Sink::Stream(writer) => Box::new(StreamAppender::new(Arc::clone(writer))),
            Sink::Callable(callback) => Box::new(CallableAppender::new(Arc::clone(callback))),
        };

        let formatter = match config.format() {
            DataFormat::Text => Formatter::Text(
                TextFormat::new(*config.text_config(), config.is_colored())
                    .with_context(context.clone()),
            ),
            DataFormat::Json => Formatter::Json(JsonFormat::new().with_context(context.clone())),
        };

        Ok(Self {
            name: config.name().to_string(),
            sink: config.sink().describe(),
            threshold,
            formatter,
            appender: Mutex::new(appender),
        })
    }

    fn deliver(&self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.render(record)?;
        self.appender.lock().append(&line)
    }

    fn snapshot(&self) -> LiveOutput {
        LiveOutput {
            name: self.name.clone(),
            sink: self.sink.clone(),
            data_format: self.formatter.data_format(),
            threshold: self.threshold,
            colored: matches!(&self.formatter, Formatter::Text(text) if text.colored()),
        }
    }
}

/// The sinks currently receiving records, in registry order
#[derive(Default)]
pub(crate) struct SinkSet {
    sinks: Vec<InstalledSink>,
}

impl SinkSet {
    pub(crate) fn new(sinks: Vec<InstalledSink>) -> Self {
        Self { sinks }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub(crate) fn snapshot(&self) -> Vec<LiveOutput> {
        self.sinks.iter().map(InstalledSink::snapshot).collect()
    }

    /// Deliver `record` to every sink whose threshold it meets
    ///
    /// **Per-sink isolation**: an error or panic in one sink is reported on
    /// stderr and counted; the remaining sinks still receive the record.
    ///
    /// A callable sink that logs through its own registry would wait on its
    /// own lock. Such nested records are dropped for that sink and reported.
    pub(crate) fn dispatch(&self, record: &LogRecord, metrics: &LoggerMetrics) {
        for sink in &self.sinks {
            if !record.level.passes(sink.threshold) {
                metrics.record_filtered();
                continue;
            }

            let Some(_guard) = DeliveryGuard::enter(sink) else {
                eprintln!(
                    "[LOGGER ERROR] Output '{}' logged from inside its own sink; record dropped",
                    sink.name
                );
                metrics.record_failed();
                continue;
            };

            let outcome =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.deliver(record)));

            match outcome {
                Ok(Ok(())) => {
                    metrics.record_delivered();
                }
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Output '{}' failed: {}", sink.name, e);
                    metrics.record_failed();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Output '{}' panicked: {}. \
                         Other outputs continue to function.",
                        sink.name, panic_msg
                    );
                    metrics.record_failed();
                }
            }
        }
    }

    /// Flush every sink, returning the first error after trying them all
    pub(crate) fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.appender.lock().flush() {
                eprintln!("[LOGGER ERROR] Output '{}' flush failed: {}", sink.name, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

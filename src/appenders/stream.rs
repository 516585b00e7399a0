//! Appender writing to a shared stream

use crate::core::{Appender, LoggerError, Result, SharedWriter};
use std::io::Write;
use std::sync::Arc;

pub struct StreamAppender {
    writer: SharedWriter,
}

impl StreamAppender {
    pub fn new(writer: SharedWriter) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> SharedWriter {
        Arc::clone(&self.writer)
    }
}

impl Appender for StreamAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| LoggerError::sink_write("stream", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| LoggerError::sink_write("stream", e))
    }

    fn name(&self) -> &str {
        "stream"
    }
}

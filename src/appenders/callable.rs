//! Appender forwarding rendered lines to a user callable

use crate::core::{Appender, Result, SinkFn};

pub struct CallableAppender {
    callback: SinkFn,
}

impl CallableAppender {
    pub fn new(callback: SinkFn) -> Self {
        Self { callback }
    }
}

impl Appender for CallableAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        (self.callback)(line)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "callable"
    }
}

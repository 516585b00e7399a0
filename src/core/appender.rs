//! Appender trait for log output destinations

use super::error::Result;

/// A write target receiving fully rendered lines
pub trait Appender: Send + Sync {
    fn append(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

//! Sink destinations an output can write to

use super::error::Result;
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// A writer shared between the configuration and every sink set built from it
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A callable receiving each rendered line
pub type SinkFn = Arc<dyn Fn(&str) -> Result<()> + Send + Sync>;

#[derive(Clone)]
pub enum Sink {
    /// Standard output (or the console writer injected into the registry)
    Stdout,
    /// Standard error
    Stderr,
    /// File opened in append mode; missing parent directories are created
    File(PathBuf),
    /// Any writable stream
    Stream(SharedWriter),
    /// A callable invoked synchronously on the logging thread
    Callable(SinkFn),
}

impl Sink {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Sink::File(path.into())
    }

    pub fn stream<W: Write + Send + 'static>(writer: W) -> Self {
        Sink::Stream(Arc::new(Mutex::new(Box::new(writer))))
    }

    /// Sink that hands each formatted line to `callback`
    ///
    /// Records the callback logs through the same registry are not delivered
    /// back to this sink; they still reach the other outputs.
    pub fn callable<F>(callback: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        Sink::Callable(Arc::new(callback))
    }

    /// Parse a sink written in configuration: `stdout`, `stderr` or a file path
    pub fn parse(spec: &str) -> Self {
        match spec.trim() {
            "stdout" => Sink::Stdout,
            "stderr" => Sink::Stderr,
            path => Sink::File(PathBuf::from(path)),
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, Sink::Stdout | Sink::Stderr)
    }

    /// Short description used in diagnostics and inspection
    pub fn describe(&self) -> String {
        match self {
            Sink::Stdout => "stdout".to_string(),
            Sink::Stderr => "stderr".to_string(),
            Sink::File(path) => path.display().to_string(),
            Sink::Stream(_) => "<stream>".to_string(),
            Sink::Callable(_) => "<callable>".to_string(),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::File(path) => f.debug_tuple("File").field(path).finish(),
            other => f.write_str(&other.describe()),
        }
    }
}

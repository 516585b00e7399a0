//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How a file sink is opened and written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Keep records in a buffer instead of flushing after each one
    pub buffered: bool,
    /// Open the file on the first record instead of at install time
    pub delay: bool,
}

pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    options: FileOptions,
}

impl FileAppender {
    /// Open `path` for appending, creating missing parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open(path, FileOptions::default())
    }

    pub fn open(path: impl Into<PathBuf>, options: FileOptions) -> Result<Self> {
        let mut appender = Self {
            path: path.into(),
            writer: None,
            options,
        };
        Self::create_parents(&appender.path)?;
        if !options.delay {
            appender.writer = Some(Self::open_writer(&appender.path)?);
        }
        Ok(appender)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn create_parents(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::sink_write(path.display().to_string(), e)
            })?;
        }
        Ok(())
    }

    fn open_writer(path: &Path) -> Result<BufWriter<File>> {
        Self::create_parents(path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::sink_write(path.display().to_string(), e))?;
        Ok(BufWriter::new(file))
    }
}

impl Appender for FileAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        if self.writer.is_none() {
            self.writer = Some(Self::open_writer(&self.path)?);
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::other("File writer not initialized"))?;

        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::sink_write(self.path.display().to_string(), e))?;
        if !self.options.buffered {
            writer
                .flush()
                .map_err(|e| LoggerError::sink_write(self.path.display().to_string(), e))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer
                .flush()
                .map_err(|e| LoggerError::sink_write(self.path.display().to_string(), e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

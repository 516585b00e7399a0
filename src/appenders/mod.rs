//! Appender implementations

pub mod callable;
pub mod console;
pub mod file;
pub mod stream;

pub use callable::CallableAppender;
pub use console::{ConsoleAppender, ConsoleStream};
pub use file::{FileAppender, FileOptions};
pub use stream::StreamAppender;

pub use crate::core::Appender;

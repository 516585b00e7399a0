//! Logging macros for ergonomic log message formatting.
//!
//! Besides `format!`-style arguments, the macros capture the enclosing
//! function name and accept `key = value` extras after a `;`.
//!
//! # Examples
//!
//! ```
//! use log11::{info, Log, OutputConfig, Sink};
//!
//! let log = Log::builder().no_project_root().build();
//! log.add_output(OutputConfig::new("memory", Sink::stream(Vec::new())))?;
//! let logger = log.logger();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With extras
//! info!(logger, "User logged in"; user_id = 42, action = "login");
//! # Ok::<(), log11::LoggerError>(())
//! ```

/// Name of the enclosing function, without its module path
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name: &'static str = type_name_of(f);
        let mut name = name.strip_suffix("::f").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        match name.rfind("::") {
            Some(index) => &name[index + 2..],
            None => name,
        }
    }};
}

/// Build [`Extras`](crate::Extras) from `key = value` pairs, keeping their order.
///
/// ```
/// let extras = log11::extras!(user_id = 42, action = "login");
/// assert_eq!(extras.keys().collect::<Vec<_>>(), vec!["user_id", "action"]);
/// ```
#[macro_export]
macro_rules! extras {
    () => {
        $crate::Extras::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut extras = $crate::Extras::new();
        $(extras.insert(stringify!($key), $value);)+
        extras
    }};
}

/// Log a message at a level given by name.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::log;
/// log!(logger, "INFO", "Simple message");
/// log!(logger, "ERROR", "Error code: {}", 500; retry = false);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)? ; $($key:ident = $value:expr),+ $(,)?) => {
        $logger.log_at(
            $level,
            format!($fmt $(, $arg)*),
            $crate::extras!($($key = $value),+),
            $crate::CallSite {
                file: file!(),
                line: line!(),
                function: Some($crate::__function_name!()),
            },
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_at(
            $level,
            format!($($arg)+),
            $crate::Extras::new(),
            $crate::CallSite {
                file: file!(),
                line: line!(),
                function: Some($crate::__function_name!()),
            },
        )
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "TRACE", $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10; stage = "parse");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "DEBUG", $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100; batch = 3);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "INFO", $($arg)+)
    };
}

/// Log a success-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::success;
/// success!(logger, "Migration finished"; tables = 12);
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "SUCCESS", $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "WARNING", $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "ERROR", $($arg)+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # let logger = log11::Log::builder().no_project_root().build().logger();
/// use log11::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "CRITICAL", $($arg)+)
    };
}

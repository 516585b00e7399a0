//! Basic logger usage example
//!
//! Demonstrates the zero-config logger, custom levels and per-output levels.
//!
//! Run with: cargo run --example basic_usage

use log11::prelude::*;
use log11::Color;

fn main() -> Result<()> {
    println!("=== log11 - Basic Usage Example ===\n");

    // No configuration: colored text on stdout at INFO
    let logger = get_logger();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message (hidden)");
    logger.debug("This is a debug message (hidden)");
    logger.info("This is an info message");
    logger.success("This is a success message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Structured extras:");
    info!(logger, "User logged in"; user_id = 123, action = "login");
    warning!(logger, "Slow request"; path = "/api/items", elapsed_ms = 1250.5);

    println!("\n3. Lowering the threshold:");
    let log = Log::global();
    log.add_output(
        OutputConfig::new("default", Sink::Stdout)
            .level("TRACE")
            .text_format_config(TextFormatConfig::all())
            .replace(true),
    )?;
    trace!(logger, "Trace message (visible now, with the date)");

    println!("\n4. Custom level:");
    log.add_level("NOTICE", 22, Color::Cyan)?;
    logger.log("NOTICE", "Levels are data; the column widens to fit");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

//! File logging example
//!
//! Demonstrates logging to the console and to text and JSON files at once.
//!
//! Run with: cargo run --example file_logging

use log11::prelude::*;

fn main() -> Result<()> {
    println!("=== log11 - File Logging Example ===\n");

    let log = Log::new();

    log.add_output(OutputConfig::new("console", Sink::Stderr).level("INFO"))?;
    log.add_output(
        OutputConfig::new("text", Sink::file("logs/application.log"))
            .level("DEBUG")
            .text_format_config(TextFormatConfig::all()),
    )?;
    log.add_output(
        OutputConfig::new("json", Sink::file("logs/application.jsonl"))
            .data_format(DataFormat::Json)
            .level("WARNING")
            .option("buffered", true),
    )?;

    let logger = log.apply()?;

    println!("1. Logging to console and files:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warning("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        info!(logger, "Processing item {}/5", i; item = i);
        if i == 3 {
            warning!(logger, "Item took longer than expected"; item = i, elapsed_ms = 830);
        }
    }
    success!(logger, "All operations completed");

    println!("\n3. Live outputs:");
    for output in log.live_outputs() {
        println!(
            "   {:<8} {:<24} {:<5} threshold={}",
            output.name,
            output.sink,
            output.data_format.as_str(),
            output.threshold
        );
    }

    // The JSON output is buffered
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/application.log' and 'logs/application.jsonl'");

    Ok(())
}

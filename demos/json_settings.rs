//! Declarative configuration example
//!
//! Loads levels and outputs from a JSON document and applies them at once.
//!
//! Run with: cargo run --example json_settings

use log11::prelude::*;

const SETTINGS: &str = r#"{
    "levels": [
        { "name": "AUDIT", "rank": 35, "color": "light-magenta" }
    ],
    "outputs": [
        { "name": "console", "sink": "stdout", "level": "DEBUG",
          "text": { "function": false } },
        { "name": "audit", "sink": "logs/audit.jsonl", "format": "json",
          "level": "AUDIT", "options": { "delay": true } }
    ]
}"#;

fn main() -> Result<()> {
    println!("=== log11 - JSON Settings Example ===\n");

    let settings = LogSettings::from_json(SETTINGS)?;
    let log = Log::new();
    let logger = log.apply_settings(&settings)?;

    debug!(logger, "Settings applied"; outputs = settings.outputs.len());
    logger.log("AUDIT", "Permissions changed");
    log11::log!(logger, "AUDIT", "Role {} granted", "admin"; user = "alice");
    logger.info("Audit entries go to logs/audit.jsonl");

    println!("\nRound-tripped settings:\n{}", settings.to_json()?);

    Ok(())
}

//! JSON configuration example
//!
//! Demonstrates loading named sinks from JSON, a custom sink registered by
//! name, and the application-wide facade.
//!
//! Run with: cargo run --example json_config

use multisink_logger::prelude::*;

const CONFIG: &str = r#"{
    "console": {
        "engine": "Console",
        "stream": "stdout",
        "colors": false
    },
    "audit": {
        "className": "Prefixed",
        "channels": ["audit"],
        "prefix": "AUDIT>"
    },
    "alerts": {
        "engine": "Email",
        "levels": ["emergency", "alert", "critical"],
        "to": "oncall@example.com",
        "from": { "logger@example.com": "Logger" },
        "debug": true
    }
}"#;

/// Prints each line behind a configurable prefix
struct PrefixedSink {
    prefix: String,
    formatter: LineFormatter,
}

impl Sink for PrefixedSink {
    fn log(&mut self, entry: &LogEntry) -> Result<()> {
        println!("{} {}", self.prefix, self.formatter.format(entry));
        Ok(())
    }

    fn name(&self) -> &str {
        "prefixed"
    }
}

fn main() -> Result<()> {
    println!("=== Multisink Logger - JSON Configuration Example ===\n");

    let log = LogFacade::from_config(LoggerConfig::from_json_str(CONFIG)?);
    log.register("Prefixed", |config| {
        Ok(Box::new(PrefixedSink {
            prefix: config.string("prefix")?.unwrap_or(">").to_string(),
            formatter: LineFormatter::new().with_timestamp_format("%H:%M:%S"),
        }) as Box<dyn Sink>)
    });

    println!("Configured sinks: {:?}\n", log.configured());

    log.info("Service ready", LogContext::new())?;
    log.notice(
        "Role {role} granted to {user}",
        LogContext::new()
            .with_field("role", "admin")
            .with_field("user", "bob")
            .with_channel("audit"),
    )?;
    log.critical("Primary database unreachable", LogContext::new())?;

    let logger = log.logger();
    println!(
        "\nDelivered {} lines across {} sinks",
        logger.metrics().delivered_count(),
        logger.sink_names().len()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

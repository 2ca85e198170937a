//! Basic logger usage example
//!
//! Demonstrates console logging at every level, placeholders, channels and
//! per-sink filtering.
//!
//! Run with: cargo run --example basic_usage

use multisink_logger::prelude::*;
use multisink_logger::{info, warning};

fn main() -> Result<()> {
    println!("=== Multisink Logger - Basic Usage Example ===\n");

    // One console sink on stdout, built immediately
    let logger = Logger::with_config(
        SinkConfig::with_engine("Console").with_option("stream", "stdout"),
    )?;

    println!("1. Logging at every level:");
    for level in LogLevel::ALL {
        logger.log(level, format!("This is a {} message", level.as_str()), LogContext::new())?;
    }

    println!("\n2. Placeholders and context:");
    logger.info(
        "User {user} logged in from {ip}",
        LogContext::new()
            .with_field("user", "alice")
            .with_field("ip", "10.0.0.7")
            .with_field("attempts", 1),
    )?;

    println!("\n3. Channels:");
    logger.notice(
        "Invoice {id} paid",
        LogContext::new().with_field("id", 1042).with_channel("billing"),
    )?;

    println!("\n4. A second sink that only takes errors on the billing channel:");
    logger.configure(
        "billing_errors",
        SinkConfig::with_engine("Console")
            .with_option("stream", "stdout")
            .with_levels(["error", "critical", "alert", "emergency"])
            .with_channels(["billing"]),
    );
    logger.error("Card declined", LogContext::new().with_channel("billing"))?;
    logger.error("Disk almost full", LogContext::new())?;

    println!("\n5. Macros:");
    info!(logger, "{} workers started", 4)?;
    warning!(logger, "Queue at {}% capacity", 85)?;

    println!("\n6. Invalid levels are rejected:");
    if let Err(e) = logger.log("verbose", "never printed", LogContext::new()) {
        println!("   {}", e);
    }

    let metrics = logger.metrics();
    println!(
        "\nDelivered {} lines, filtered {}, failed {}",
        metrics.delivered_count(),
        metrics.filtered_count(),
        metrics.failed_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

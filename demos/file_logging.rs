//! File logging example
//!
//! Demonstrates logging to console and a size-rotated file at the same time.
//!
//! Run with: cargo run --example file_logging

use multisink_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Multisink Logger - File Logging Example ===\n");

    let logger = Logger::builder()
        .sink("console", SinkConfig::with_engine("Console"))
        .sink(
            "file",
            SinkConfig::with_engine("File")
                .with_option("file", "application.log")
                .with_option("size", 4096)
                .with_option("rotate", 3),
        )
        .build();

    println!("1. Logging to both console and file:");

    logger.info("Application started", LogContext::new())?;
    logger.debug("Loading configuration...", LogContext::new())?;
    logger.warning(
        "Using default settings for {count} options",
        LogContext::new().with_field("count", 2),
    )?;
    logger.error(
        "Failed to load optional plugin {plugin}",
        LogContext::new().with_field("plugin", "metrics-exporter"),
    )?;

    println!("\n2. Writing enough lines to rotate:");

    for i in 1..=200 {
        logger.info(
            "Processing item {i}/200",
            LogContext::new().with_field("i", i).with_channel("worker"),
        )?;
    }

    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.log.1' .. '.3' for the output");

    Ok(())
}

//! Basic emitter usage example
//!
//! Sends one message per severity to a Graylog HTTP input.
//!
//! Run with: cargo run --example basic_usage
//! Point it elsewhere with GRAYLOG_HOST / GRAYLOG_PORT; silence it with GELF_DISABLED=1.

use gelf_emitter::metadata;
use gelf_emitter::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== GELF Emitter - Basic Usage Example ===\n");

    let host = std::env::var("GRAYLOG_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("GRAYLOG_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(12201);

    let emitter = Emitter::builder(host, port, "basic-usage-demo")
        .timeout(Duration::from_secs(2))
        .build()?;

    println!("1. Default level: {}", emitter.default_level());

    let meta = metadata! { "demo" => "basic_usage", "attempt" => 1 };

    println!("2. Logging at every exposed severity:");
    emitter.debug("debug message", "debug message", &meta);
    emitter.info("info message", "info message", &meta);
    emitter.notice("notice message", "notice message", &meta);
    emitter.warning("warning message", "warning message", &meta);
    emitter.error("error message", "error message\nwith a second line", &meta);
    emitter.critical("critical message", "critical message", &meta);
    emitter.alert("alert message", "alert message", &meta);

    let metrics = emitter.metrics();
    println!(
        "\n3. sent={} suppressed={} dropped={}",
        metrics.sent(),
        metrics.suppressed(),
        metrics.dropped()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

//! Request logging example
//!
//! Simulates a few completed HTTP requests and logs each one. Uses the
//! in-memory transport so it runs without a Graylog server.
//!
//! Run with: cargo run --example request_logging

use gelf_emitter::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== GELF Emitter - Request Logging Example ===\n");

    let transport = MemoryTransport::new();
    let emitter = Arc::new(
        Emitter::builder("graylog", 12201, "request-logging-demo")
            .default_level(Severity::Info)
            .transport(transport.clone())
            .build()?,
    );

    let requests = vec![
        (RequestSummary::new(200, "GET", "/health", "10.0.0.1", Duration::from_millis(2)), None),
        (RequestSummary::new(302, "GET", "/login", "10.0.0.2", Duration::from_millis(5)), None),
        (
            RequestSummary::new(404, "GET", "/missing", "10.0.0.3", Duration::from_millis(3)),
            Some("route not found".to_string()),
        ),
        (
            RequestSummary::new(503, "POST", "/orders", "10.0.0.4", Duration::from_millis(950)),
            Some("inventory service unavailable".to_string()),
        ),
    ];

    // Each "handler thread" shares the same emitter
    let handles: Vec<_> = requests
        .into_iter()
        .map(|(summary, error)| {
            let emitter = Arc::clone(&emitter);
            thread::spawn(move || log_request(&emitter, &summary, error.as_deref()))
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    for message in transport.messages() {
        println!("{}", message);
    }

    println!("\nsent={}", emitter.metrics().sent());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}

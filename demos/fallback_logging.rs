//! Fallback logging example
//!
//! Demonstrates a component logger writing protected daily files while no
//! advanced backend is present, then switching to the backend once it boots.
//!
//! Run with: cargo run --example fallback_logging

use component_logger::core::hooks::{HOOK_FALLBACK, HOOK_LOGGED};
use component_logger::prelude::*;
use component_logger::{ActionTracker, BackendLogger, BackendRegistry, HookBus};
use std::fs;
use std::sync::Arc;

/// A stand-in for a host's advanced logging backend
struct DemoBackend;

impl BackendRegistry for DemoBackend {
    fn has_type(&self, path: &str) -> bool {
        path == "wonolog::Configurator"
    }

    fn symbol(&self, path: &str) -> Option<String> {
        match path {
            "wonolog::Configurator::ACTION_SETUP" => Some("wonolog.setup".to_string()),
            "wonolog::LOG" => Some("wonolog.log".to_string()),
            _ => None,
        }
    }

    fn logger(&self, namespace: &str, _channel: &str) -> Result<Arc<dyn BackendLogger>> {
        Err(LoggerError::BackendUnavailable {
            namespace: namespace.to_string(),
            message: "channels are not supported by the demo backend".to_string(),
        })
    }
}

fn main() -> Result<()> {
    println!("=== Component Logger - Fallback Logging Example ===\n");

    let uploads = std::env::temp_dir().join("component_logger_demo");
    let hooks = Arc::new(HookRegistry::new());
    hooks.add_action(HOOK_FALLBACK, |args| {
        println!("   fallback hook: {}", args[1]);
    });
    hooks.add_action("wonolog.log.warning", |args| {
        println!("   backend received: {}", args[0]);
    });

    let host = Host::builder()
        .hook_registry(Arc::clone(&hooks))
        .environment(ProcessEnvironment)
        .uploads(StaticUploadDir(uploads.clone()))
        .backend(Arc::new(DemoBackend))
        .build();

    let logger = ComponentLogger::new(
        LoggerOptions::new("demo-plugin").retention_days(7).min_level("info"),
        host,
    )?;

    println!("1. Logging before the backend has booted:");
    logger.debug("Filtered out by the minimum level", LogContext::new());
    logger.info("Plugin activated", LogContext::new().with_field("version", "1.2.0"));
    logger.error(
        "Payment gateway timeout",
        LogContext::new().with_field("order_id", 1042).with_field("retry", true),
    );

    if let Some(log_dir) = logger.log_directory() {
        println!("\n2. Files in {}:", log_dir.display());
        for entry in fs::read_dir(&log_dir)?.flatten() {
            println!("   {}", entry.file_name().to_string_lossy());
        }
    }

    println!("\n3. Backend boots; refreshing the cached detection:");
    hooks.do_action("wonolog.setup", &[]);
    logger.refresh_backend_cache();
    logger.warning("Now routed to the backend", LogContext::new());

    println!("\n4. Diagnostics:");
    println!("   logged notifications: {}", hooks.times_fired(HOOK_LOGGED));
    println!("{}", serde_json::to_string_pretty(&logger.debug_info())?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}

//! Logger module
//!
//! Provides logging utilities for the application:
//! - Startup banner (verbose in development, terse in production)
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    if config.app.env.is_development() {
        println!("======================================");
        println!("minidash started (development mode)");
        println!("Listening on: http://{addr}");
        println!("Routes:");
        println!("  - Home:      http://{addr}/");
        println!("  - About:     http://{addr}/about");
        println!("  - Dashboard: http://{addr}/dashboard");
        println!("  - API data:  http://{addr}/api/data");
        println!("Log level: {}", config.logging.level);
        println!("Template directory: {}", config.resources.template_dir);
        println!("Static directory: {}", config.resources.static_dir);
        if let Some(workers) = config.server.workers {
            println!("Worker threads: {workers}");
        }
        println!("Press CTRL+C to stop the server");
        println!("======================================\n");
    } else {
        println!(
            "minidash started on http://{addr} ({} mode)",
            config.app.env
        );
        if config.app.has_default_secret() {
            log_warning("Secret key is the development default; set SECRET_KEY");
        }
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}

pub fn log_shutdown() {
    println!("\n[Shutdown] Stopping server, in-flight connections will finish");
}

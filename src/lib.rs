pub mod app;
pub mod client;
pub mod config;
pub mod database;
pub mod email_client;
mod error;
pub mod templ_manager;
pub mod web;

// re-export
pub use app::{App, AppState};
pub use client::RegistrationClient;
pub use email_client::EmailClient;
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Initializes a human-readable tracing subscriber meant for local development.
/// Panics if a global subscriber was already set.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("smartmail=debug,tower_http=debug")),
        )
        .init();
}

/// Production tracing subscriber: no ANSI escapes, `info` unless overridden by `RUST_LOG`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

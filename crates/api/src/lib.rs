//! Supermarkt API - grocery price comparison backend.
//!
//! Serves products written by an external scraper, ranked full-text search,
//! user accounts with bearer tokens and shopping lists whose totals are
//! always computed from current prices.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve` and `migrate`
//! - **config**: environment-driven settings
//! - **api**: HTTP handlers, middleware, extractors and routes
//! - **services**: use cases behind traits
//! - **clients**: HTTP client for the scraper process
//! - **infra**: database, migrations, repositories and unit of work
//! - **types**: response envelopes
//!
//! Domain entities live in the `domain` crate and error/config primitives in
//! `common`.

pub mod api;
pub mod cli;
pub mod clients;
pub mod commands;
pub mod config;
pub mod infra;
pub mod services;
pub mod types;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::{Config, ConfigError};
pub use common::{AppError, AppResult};

/// Install the global fmt subscriber. `verbose` forces `debug`; otherwise
/// `RUST_LOG` applies, defaulting to `info`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

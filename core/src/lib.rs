//! # studentdesk Core
//!
//! Core library for studentdesk - the routing table and REST client behind
//! the Student Management front-end.
//!
//! Two pieces, both built once at startup and read-only afterwards:
//!
//! - [`router`]: a route table mapping locations to lazily loaded views, and a
//!   navigator that keeps the document title and viewport in sync
//! - [`api`]: a client for the `/students` resource, one HTTP request per call

// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod router;

// Re-export commonly used types
pub use api::{HttpTransport, SharedTransport, StudentApi, StudentId, Transport};
pub use config::{ApiConfig, AppConfig};
pub use error::{ApiError, Error, Result, RouterError};
pub use router::{Document, Navigation, Navigator, RouteTable};

/// Current version of the studentdesk-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the global tracing subscriber: `debug` when `debug` is set,
/// `info` otherwise. Logs go to stderr so page output stays clean.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

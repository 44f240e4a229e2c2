//! Minimal configuration module for studentdesk core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{ApiConfig, AppConfig, DEFAULT_APP_NAME, DEFAULT_BASE_URL};

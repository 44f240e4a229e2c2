//! Configuration types for studentdesk core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base address of the Student REST API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Suffix appended to every route title shown in the document title
pub const DEFAULT_APP_NAME: &str = "Student Management System";

/// Resolved configuration for the Student API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Headers sent with every request
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

impl ApiConfig {
    /// Create a config for the given base URL with the default JSON headers
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: default_headers(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: String::new(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.base_url.clone(),
            });
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: format!("{} ({})", self.base_url, e),
            });
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Whole-application configuration handed to core by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API client settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Application name used as the document title suffix
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl AppConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "app_name".to_string(),
                value: self.app_name.clone(),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            app_name: default_app_name(),
        }
    }
}

//! Error types and handling for studentdesk core

use thiserror::Error;

/// Result type alias for studentdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for studentdesk core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Student API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A view failed to render
    #[error("View error: {0}")]
    View(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Errors surfaced by the Student API client.
///
/// Nothing here is interpreted: a non-2xx response carries the status code
/// and the raw body exactly as the server sent them.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl ApiError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Route table construction and path building errors.
///
/// Navigation itself never fails; unmatched paths are redirected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No routes configured")]
    NoRoutes,

    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("Duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("Invalid route pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Fallback target '{0}' does not match any declared route")]
    FallbackUnresolved(String),

    #[error("Route '{0}' not found")]
    RouteNotFound(String),

    #[error("Missing parameter '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },

    #[error("No view registered for route '{0}'")]
    MissingView(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_body() {
        let err = ApiError::Status {
            status: 404,
            body: r#"{"detail":"Not found."}"#.to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), r#"HTTP 404: {"detail":"Not found."}"#);
    }

    #[test]
    fn test_router_error_messages() {
        assert_eq!(RouterError::NoRoutes.to_string(), "No routes configured");
        assert_eq!(
            RouterError::RouteNotFound("test".to_string()).to_string(),
            "Route 'test' not found"
        );
        assert_eq!(
            RouterError::MissingParam {
                route: "student-edit".to_string(),
                param: "id".to_string()
            }
            .to_string(),
            "Missing parameter 'id' for route 'student-edit'"
        );
    }

    #[test]
    fn test_errors_convert_into_top_level() {
        let err: Error = ApiError::Decode {
            message: "eof".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Api(ApiError::Decode { .. })));
        assert_eq!(err.to_string(), "API error: Failed to decode response: eof");

        let err: Error = ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            value: "ftp://x".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}

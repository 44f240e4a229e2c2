//! Student resource client
//!
//! Five thin wrappers, one HTTP request each. Nothing is retried, cached or
//! serialized against other calls; every method borrows `&self` and can be
//! awaited concurrently with any other.

use super::transport::{ApiRequest, HttpTransport, RawResponse, Transport};
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

const STUDENTS: &str = "students";

/// Server-side identifier of a student record. Never validated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for StudentId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

macro_rules! impl_numeric_student_id {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StudentId {
                fn from(id: $t) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_numeric_student_id!(i32, i64, u32, u64, usize);

impl std::str::FromStr for StudentId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

/// Client for the `/students` resource.
///
/// Cloning is cheap; clones share the transport and configuration.
pub struct StudentApi<T: Transport = HttpTransport> {
    transport: Arc<T>,
    base_url: Arc<Url>,
    headers: Arc<BTreeMap<String, String>>,
}

impl<T: Transport> Clone for StudentApi<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: Arc::clone(&self.base_url),
            headers: Arc::clone(&self.headers),
        }
    }
}

impl<T: Transport> fmt::Debug for StudentApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudentApi")
            .field("base_url", &self.base_url.as_str())
            .field("headers", &self.headers)
            .finish()
    }
}

impl StudentApi<HttpTransport> {
    /// Create a client that talks HTTP through `reqwest`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::with_transport(config, HttpTransport::new()?)
    }
}

impl<T: Transport> StudentApi<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: &ApiConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            value: format!("{} ({})", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url.clone(),
                message: "URL cannot be used as a base".to_string(),
            }
            .into());
        }

        Ok(Self {
            transport: Arc::new(transport),
            base_url: Arc::new(base_url),
            headers: Arc::new(config.headers.clone()),
        })
    }

    /// Base address every request is sent under
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /students`; the body is returned as the server shaped it
    pub async fn list_students(&self) -> Result<Value> {
        let response = self.send(Method::GET, None, None).await?;
        decode(&response)
    }

    /// `GET /students/{id}`
    pub async fn get_student(&self, id: impl Into<StudentId>) -> Result<Value> {
        let id = id.into();
        let response = self.send(Method::GET, Some(&id), None).await?;
        decode(&response)
    }

    /// `POST /students` with the payload passed through unmodified
    pub async fn create_student<P>(&self, student: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(student).map_err(ApiError::Encode)?;
        let response = self.send(Method::POST, None, Some(body)).await?;
        decode(&response)
    }

    /// `PUT /students/{id}` with the payload passed through unmodified
    pub async fn update_student<P>(&self, id: impl Into<StudentId>, student: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let id = id.into();
        let body = serde_json::to_value(student).map_err(ApiError::Encode)?;
        let response = self.send(Method::PUT, Some(&id), Some(body)).await?;
        decode(&response)
    }

    /// `DELETE /students/{id}`; any 2xx counts as acknowledgment
    pub async fn delete_student(&self, id: impl Into<StudentId>) -> Result<()> {
        let id = id.into();
        self.send(Method::DELETE, Some(&id), None).await?;
        Ok(())
    }

    fn endpoint(&self, id: Option<&StudentId>) -> Result<Url> {
        let mut url = (*self.base_url).clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?;
            segments.pop_if_empty().push(STUDENTS);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        id: Option<&StudentId>,
        body: Option<Value>,
    ) -> Result<RawResponse> {
        let url = self.endpoint(id)?;
        debug!(method = %method, url = %url, "Sending student API request");

        let request = ApiRequest {
            method: method.clone(),
            url,
            headers: (*self.headers).clone(),
            body,
        };
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(method = %method, status = response.status, "Student API request failed");
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        Ok(response)
    }
}

fn decode(response: &RawResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::Decode {
            message: e.to_string(),
        }
        .into()
    })
}

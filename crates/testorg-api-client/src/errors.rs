//! Error types for the TestOrg API client

use crate::transport::RawResponse;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// A failed API call: a non-success HTTP response, or a request that
/// never produced one (for example an aborted request).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestOrgApiError {
    /// Human readable description, if one is known
    pub message: Option<String>,
    /// HTTP status code of the response, if any
    pub status_code: Option<u16>,
    /// Response body. Non-JSON bodies are kept as a JSON string.
    pub body: Option<serde_json::Value>,
    /// Response metadata, if a response was received
    pub raw_response: Option<RawResponse>,
}

impl TestOrgApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn from_response(
        status_code: u16,
        body: serde_json::Value,
        raw_response: RawResponse,
    ) -> Self {
        Self {
            message: None,
            status_code: Some(status_code),
            body: Some(body),
            raw_response: Some(raw_response),
        }
    }

    pub(crate) fn aborted() -> Self {
        Self::new("The user aborted a request")
    }

    /// Deserialize the response body into an endpoint specific error shape
    pub fn body_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_value(body.clone()).ok())
    }
}

impl fmt::Display for TestOrgApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        if let Some(message) = &self.message {
            lines.push(message.clone());
        }
        if let Some(status_code) = self.status_code {
            lines.push(format!("Status code: {status_code}"));
        }
        if let Some(body) = &self.body {
            let rendered = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            lines.push(format!("Body: {rendered}"));
        }
        if lines.is_empty() {
            return write!(f, "TestOrg API request failed");
        }
        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for TestOrgApiError {}

/// A request attempt did not complete within its timeout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TestOrgApiTimeoutError {
    pub message: String,
}

impl TestOrgApiTimeoutError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn for_request(method: &reqwest::Method, path: &str) -> Self {
        Self::new(format!("Timeout exceeded when calling {method} {path}."))
    }
}

/// Main error type for the TestOrg API client
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-success status, or the request was aborted
    #[error(transparent)]
    ApiError(#[from] TestOrgApiError),

    /// The request timed out
    #[error(transparent)]
    TimeoutError(#[from] TestOrgApiTimeoutError),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    AuthError(String),
}

impl Error {
    /// HTTP status code carried by an API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::ApiError(err) => err.status_code,
            Error::HttpError(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the TestOrg API client
pub type Result<T> = std::result::Result<T, Error>;

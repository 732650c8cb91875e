//! Bearer token authentication for the TestOrg API client

use crate::errors::{
    Error,
    Result,
};
use reqwest::header::{
    AUTHORIZATION,
    HeaderMap,
    HeaderValue,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

/// Bearer token sent with every request of a client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedAuthConfig")]
pub struct AuthConfig {
    token: String,
}

#[derive(Deserialize)]
struct UncheckedAuthConfig {
    token: String,
}

impl TryFrom<UncheckedAuthConfig> for AuthConfig {
    type Error = Error;

    fn try_from(unchecked: UncheckedAuthConfig) -> Result<Self> {
        Self::new(unchecked.token)
    }
}

impl AuthConfig {
    /// Create a new authentication configuration
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let config = Self {
            token: token.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Equivalent to `AuthConfig::new(token)`
    pub fn bearer_token(token: impl Into<String>) -> Result<Self> {
        Self::new(token)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::AuthError("Bearer token cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Format the token as an Authorization header value
    pub fn as_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &"REDACTED")
            .finish()
    }
}

/// Authentication header helpers
pub struct Auth;

impl Auth {
    /// Add bearer token to request headers
    ///
    /// Formats the token according to RFC 6750 as "Bearer ***"
    pub fn add_bearer_token(headers: &mut HeaderMap, token: &str) -> Result<()> {
        let header_value = Self::create_bearer_header(token)?;
        headers.insert(AUTHORIZATION, header_value);
        Ok(())
    }

    /// Add bearer token from `AuthConfig` to request headers
    pub fn add_auth_config(headers: &mut HeaderMap, config: &AuthConfig) -> Result<()> {
        Self::add_bearer_token(headers, config.token())
    }

    /// Create a `HeaderValue` from a bearer token
    pub fn create_bearer_header(token: &str) -> Result<HeaderValue> {
        if token.trim().is_empty() {
            return Err(Error::AuthError(
                "Cannot create header from empty token".to_string(),
            ));
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::AuthError("Token contains invalid header characters".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

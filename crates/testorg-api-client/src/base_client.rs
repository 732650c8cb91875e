//! Client and per-request configuration

use crate::{
    auth::AuthConfig,
    environments::TestOrgApiEnvironment,
    errors::{
        Error,
        Result,
    },
};
use std::{
    collections::BTreeMap,
    time::Duration,
};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Environment variable overriding the environment's base URL
pub const BASE_URL_VAR: &str = "TESTORG_API_BASE_URL";
/// Environment variable holding the bearer token
pub const TOKEN_VAR: &str = "TESTORG_API_TOKEN";

/// Timeout of a single attempt when neither the client nor the request sets one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Retries after the first attempt when neither the client nor the request sets a limit
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Options used to construct a [`crate::TestOrgApiClient`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseClientOptions {
    /// Deployment to talk to, ignored when `base_url` is set
    pub environment: TestOrgApiEnvironment,
    /// Explicit base URL, e.g. for a local mock server
    pub base_url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<AuthConfig>,
    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Default per-attempt timeout
    pub timeout: Option<Duration>,
    /// Default number of retries
    pub max_retries: Option<u32>,
}

impl BaseClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_environment(environment: TestOrgApiEnvironment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Build options from `TESTORG_API_ENV`, `TESTORG_API_BASE_URL` and
    /// `TESTORG_API_TOKEN`, defaulting to production without auth.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = TestOrgApiEnvironment::from_lookup(&lookup).unwrap_or_default();
        let base_url = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty());
        // A blank token means "no auth", not an error
        let token = lookup(TOKEN_VAR).and_then(|token| AuthConfig::new(token).ok());

        Self {
            environment,
            base_url,
            token,
            ..Self::default()
        }
    }

    pub fn with_environment(mut self, environment: TestOrgApiEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_token(mut self, token: AuthConfig) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// The explicit base URL if set, otherwise the environment's
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Validate the options
    ///
    /// Ensures the base URL is a well formed http(s) URL and the timeout is non-zero
    pub fn validate(&self) -> Result<()> {
        let base_url = self.resolved_base_url();
        if base_url.is_empty() {
            return Err(Error::ConfigError("Base URL cannot be empty".to_string()));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::ConfigError(
                "Base URL must start with http:// or https://".to_string(),
            ));
        }

        Url::parse(base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL '{base_url}': {e}")))?;

        if self.timeout == Some(Duration::ZERO) {
            return Err(Error::ConfigError("Timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Options overriding the client defaults for a single call
#[derive(Debug, Clone, Default)]
pub struct BaseRequestOptions {
    /// Per-attempt timeout
    pub timeout: Option<Duration>,
    /// Number of retries
    pub max_retries: Option<u32>,
    /// Extra headers, overriding client headers with the same name
    pub headers: BTreeMap<String, String>,
    /// Extra query parameters, appended after the endpoint's own
    pub query_params: Vec<(String, String)>,
    /// Cancels the call when triggered
    pub abort_signal: Option<CancellationToken>,
}

impl BaseRequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    pub fn with_abort_signal(mut self, signal: CancellationToken) -> Self {
        self.abort_signal = Some(signal);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::ENVIRONMENT_VAR;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = BaseClientOptions::new();
        assert_eq!(options.environment, TestOrgApiEnvironment::Production);
        assert_eq!(options.resolved_base_url(), "https://api.testorg.com");
        assert!(options.token.is_none());
        assert!(options.headers.is_empty());
        assert!(options.timeout.is_none());
        assert!(options.max_retries.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_base_url_overrides_environment() {
        let options = BaseClientOptions::from_environment(TestOrgApiEnvironment::Staging);
        assert_eq!(options.resolved_base_url(), "https://staging.api.testorg.com");

        let options = options.with_base_url("http://localhost:8080");
        assert_eq!(options.resolved_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_builder_setters() {
        let token = AuthConfig::new("abc").unwrap();
        let options = BaseClientOptions::new()
            .with_environment(TestOrgApiEnvironment::Staging)
            .with_token(token.clone())
            .with_header("X-Team", "movies")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(4);

        assert_eq!(options.environment, TestOrgApiEnvironment::Staging);
        assert_eq!(options.token, Some(token));
        assert_eq!(options.headers.get("X-Team").map(String::as_str), Some("movies"));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.max_retries, Some(4));
    }

    #[rstest]
    #[case("https://api.example.com")]
    #[case("http://localhost:3000")]
    #[case("http://127.0.0.1:8080/api/v1")]
    #[case("http://[::1]:8080")]
    #[case("https://api.example.com/path?param=value")]
    fn test_validate_accepts(#[case] base_url: &str) {
        assert!(BaseClientOptions::new().with_base_url(base_url).validate().is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("not-a-url")]
    #[case("ftp://example.com")]
    #[case("  https://api.example.com")]
    #[case("http://")]
    fn test_validate_rejects(#[case] base_url: &str) {
        assert_matches!(
            BaseClientOptions::new().with_base_url(base_url).validate(),
            Err(Error::ConfigError(_))
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let options = BaseClientOptions::new().with_timeout(Duration::ZERO);
        assert_matches!(
            options.validate(),
            Err(Error::ConfigError(msg)) if msg.contains("Timeout")
        );
    }

    #[test]
    fn test_from_lookup_empty() {
        let options = BaseClientOptions::from_lookup(lookup_from(&[]));
        assert_eq!(options, BaseClientOptions::default());
    }

    #[test]
    fn test_from_lookup_all_vars() {
        let options = BaseClientOptions::from_lookup(lookup_from(&[
            (ENVIRONMENT_VAR, "staging"),
            (BASE_URL_VAR, "http://localhost:9000"),
            (TOKEN_VAR, "secret"),
        ]));

        assert_eq!(options.environment, TestOrgApiEnvironment::Staging);
        assert_eq!(options.resolved_base_url(), "http://localhost:9000");
        assert_eq!(options.token.as_ref().map(AuthConfig::token), Some("secret"));
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let options = BaseClientOptions::from_lookup(lookup_from(&[
            (ENVIRONMENT_VAR, "nowhere"),
            (BASE_URL_VAR, "   "),
            (TOKEN_VAR, "  "),
        ]));

        assert_eq!(options, BaseClientOptions::default());
    }

    #[test]
    fn test_request_options_builder() {
        let signal = CancellationToken::new();
        let options = BaseRequestOptions::new()
            .with_timeout(Duration::from_millis(250))
            .with_max_retries(0)
            .with_header("X-Request", "1")
            .with_query_param("a", "1")
            .with_query_param("a", "2")
            .with_abort_signal(signal.clone());

        assert_eq!(options.timeout, Some(Duration::from_millis(250)));
        assert_eq!(options.max_retries, Some(0));
        assert_eq!(options.headers.len(), 1);
        assert_eq!(
            options.query_params,
            vec![
                ("a".to_string(), "1".to_string()),
                ("a".to_string(), "2".to_string())
            ]
        );
        signal.cancel();
        assert!(options.abort_signal.unwrap().is_cancelled());
    }
}

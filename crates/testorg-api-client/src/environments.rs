//! Deployment targets of the TestOrg API

use crate::errors::{
    Error,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the [`TestOrgApiEnvironment`]
pub const ENVIRONMENT_VAR: &str = "TESTORG_API_ENV";

/// Environment for the TestOrg API client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TestOrgApiEnvironment {
    /// Production environment (api.testorg.com)
    #[default]
    Production,
    /// Staging environment (staging.api.testorg.com)
    Staging,
}

impl FromStr for TestOrgApiEnvironment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(TestOrgApiEnvironment::Production),
            "staging" | "stage" => Ok(TestOrgApiEnvironment::Staging),
            _ => {
                Err(Error::ConfigError(format!(
                    "Invalid environment '{s}'. Valid values are: production, prod, staging, stage"
                )))
            }
        }
    }
}

impl fmt::Display for TestOrgApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOrgApiEnvironment::Production => write!(f, "Production"),
            TestOrgApiEnvironment::Staging => write!(f, "Staging"),
        }
    }
}

impl TestOrgApiEnvironment {
    /// Get the base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            TestOrgApiEnvironment::Production => "https://api.testorg.com",
            TestOrgApiEnvironment::Staging => "https://staging.api.testorg.com",
        }
    }

    /// Load environment from the `TESTORG_API_ENV` environment variable
    ///
    /// Returns None if the variable is not set or contains an invalid value.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        lookup(ENVIRONMENT_VAR).and_then(|val| val.parse().ok())
    }

    /// Same as `from_env()` but falls back to `default`
    pub fn from_env_or(default: Self) -> Self {
        Self::from_env().unwrap_or(default)
    }
}

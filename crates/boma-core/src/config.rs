//! Backend connection parameters.
//!
//! Everything comes from the process environment at startup; there is no
//! runtime reconfiguration and no config file. [`BackendConfig::from_lookup`]
//! keeps the resolution pure so tests never touch the real environment.

use std::time::Duration;

use crate::error::StoreError;

/// Request timeout applied when `BOMA_TIMEOUT_MS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Connection parameters for the hosted platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Bearer credential for every request.
    pub api_key: String,
    /// Hosted-platform project identifier.
    pub project_id: String,
    /// Host serving the document store API.
    pub api_host: String,
    /// Host handling sign-in flows.
    pub auth_host: String,
    /// Bucket backing file storage for this project.
    pub storage_bucket: String,
    /// Application registration identifier.
    pub app_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve the configuration through `lookup`. Empty values count as
    /// missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let require = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| StoreError::Config(format!("{var} is not set")))
        };

        let timeout = match lookup("BOMA_TIMEOUT_MS") {
            None => DEFAULT_TIMEOUT,
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    StoreError::Config(format!("BOMA_TIMEOUT_MS is not a number: '{raw}'"))
                })?;
                Duration::from_millis(millis)
            }
        };

        Ok(Self {
            api_key: require("BOMA_API_KEY")?,
            project_id: require("BOMA_PROJECT_ID")?,
            api_host: require("BOMA_API_HOST")?,
            auth_host: require("BOMA_AUTH_HOST")?,
            storage_bucket: require("BOMA_STORAGE_BUCKET")?,
            app_id: require("BOMA_APP_ID")?,
            timeout,
        })
    }
}

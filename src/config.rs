//! Environment-backed configuration for the generation API.
//!
//! The pipeline needs exactly two secrets: the bearer credential and the
//! endpoint URL of the hosted text-generation model. Both are read from the
//! environment once at startup and validated before any network call.
//!
//! Loading is idempotent: against a stable environment, repeated calls to
//! [`Config::from_env`] return equal values and never touch anything outside
//! the process. Tests inject values through [`Config::new`] or the lookup
//! seam instead of mutating the process environment.

use crate::error::ConfigError;
use std::env;
use tracing::{debug, instrument};

/// Environment variable holding the bearer credential.
pub const API_KEY_VAR: &str = "HF_API_KEY";
/// Environment variable holding the generation endpoint URL.
pub const API_URL_VAR: &str = "HF_API_URL";

/// Validated API credentials and endpoint, immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token for the `Authorization` header.
    pub api_key: String,
    /// Full URL of the text-generation endpoint.
    pub api_url: String,
}

impl Config {
    /// Build a configuration from explicit values.
    ///
    /// This is the dependency-injection entry point: hosts that manage their
    /// own secrets pass them here directly and never involve the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] if either value is blank.
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let api_url = api_url.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Empty(API_KEY_VAR));
        }
        if api_url.trim().is_empty() {
            return Err(ConfigError::Empty(API_URL_VAR));
        }
        Ok(Config { api_key, api_url })
    }

    /// Load and validate configuration from the process environment.
    ///
    /// Reads `HF_API_KEY` and `HF_API_URL`. Absence or emptiness of either
    /// is fatal and reported before any request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::Empty`] naming the
    /// offending variable.
    #[instrument(level = "debug")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|var| env::var(var).ok())?;
        debug!(api_url = %config.api_url, "Loaded configuration from environment");
        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Separated from [`Config::from_env`] so tests can supply a closure over
    /// a map instead of mutating real environment variables.
    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = require(&lookup, API_KEY_VAR)?;
        let api_url = require(&lookup, API_URL_VAR)?;
        Ok(Config { api_key, api_url })
    }
}

fn require(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    match lookup(var) {
        None => Err(ConfigError::Missing(var)),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(var)),
        Some(value) => Ok(value),
    }
}

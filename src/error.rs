//! Error types for configuration loading and API communication.
//!
//! The taxonomy is deliberately small:
//! - [`ConfigError`]: a required environment variable is missing or empty.
//!   Fatal, reported before any network call is attempted.
//! - [`ApiError`]: anything that goes wrong between building the request and
//!   decoding the response, including the bounded-retry timeout for the
//!   provider's "model warming up" state.
//!
//! The transient 503 warming state is represented as [`ApiError::Warming`] so
//! the retry decorator can recognize it; it only escapes to callers as
//! [`ApiError::WarmupTimeout`] once the retry budget is spent.

use std::time::Duration;
use thiserror::Error;

/// A required configuration value could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The environment variable is not set at all.
    #[error("{0} not found in environment variables")]
    Missing(&'static str),
    /// The environment variable is set but blank.
    #[error("{0} is set but empty")]
    Empty(&'static str),
}

/// A generation request could not be completed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, TLS, timeout,
    /// or an error while reading the body.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status other than 503.
    #[error("API returned {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// A truncated preview of the response body.
        body: String,
    },

    /// The provider answered 2xx but the body was not valid JSON.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The model is still loading (HTTP 503). Carries the provider's
    /// suggested delay when a `Retry-After` header was present.
    ///
    /// Internal to the retry path; [`crate::api::RetrySubmit`] consumes this
    /// variant and either re-issues the request or converts it into
    /// [`ApiError::WarmupTimeout`].
    #[error("model is loading{}", .retry_after.map(|d| format!(" (retry after {}s)", d.as_secs())).unwrap_or_default())]
    Warming {
        /// Parsed `Retry-After` header value, if the provider sent one.
        retry_after: Option<Duration>,
    },

    /// The model never finished loading within the retry budget.
    #[error("model still loading after {attempts} attempts ({}s waited)", .waited.as_secs())]
    WarmupTimeout {
        /// Number of requests issued before giving up.
        attempts: usize,
        /// Total time spent sleeping between attempts.
        waited: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::Missing("HF_API_KEY").to_string(),
            "HF_API_KEY not found in environment variables"
        );
        assert_eq!(
            ConfigError::Empty("HF_API_URL").to_string(),
            "HF_API_URL is set but empty"
        );
    }

    #[test]
    fn test_warming_display_with_and_without_delay() {
        let with = ApiError::Warming {
            retry_after: Some(Duration::from_secs(20)),
        };
        assert_eq!(with.to_string(), "model is loading (retry after 20s)");

        let without = ApiError::Warming { retry_after: None };
        assert_eq!(without.to_string(), "model is loading");
    }

    #[test]
    fn test_warmup_timeout_message() {
        let e = ApiError::WarmupTimeout {
            attempts: 6,
            waited: Duration::from_secs(180),
        };
        assert_eq!(
            e.to_string(),
            "model still loading after 6 attempts (180s waited)"
        );
    }
}

//! Generation API transport with bounded warm-up retry logic.
//!
//! This module provides the interface for communicating with a hosted
//! text-generation endpoint. It includes automatic retry logic for the
//! provider's transient "model loading" state (HTTP 503), bounded by both an
//! attempt cap and a total elapsed-wait budget.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`Submit`]: Core trait defining async request submission
//! - [`HttpSubmit`]: Single-shot HTTP transport over `reqwest`
//! - [`RetrySubmit`]: Decorator that adds warm-up retry logic to any
//!   [`Submit`] implementation
//!
//! # Retry Strategy
//!
//! Only the warming state is retried; transport failures and non-503 error
//! statuses surface immediately.
//!
//! - Maximum 5 retry attempts by default
//! - Delay per attempt: the provider's `Retry-After` when present, otherwise
//!   exponential backoff starting at 10 seconds
//! - Per-attempt delay capped at 60 seconds
//! - Total sleep budget of 180 seconds; exceeding it (or the attempt cap)
//!   yields [`ApiError::WarmupTimeout`]
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Request timeout applied to every HTTP attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback delay when a 503 arrives without a `Retry-After` header.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Upper bound on any single backoff delay.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Default number of warm-up retries before giving up.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Default total sleep budget across all warm-up retries.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(180);

/// Trait for async submission of generation requests.
///
/// Implementors send a [`GenerationRequest`] to a text-generation backend and
/// return its parsed response. This abstraction allows decorators (like retry
/// logic) and in-process test stubs to stand in for the real transport.
#[allow(async_fn_in_trait)]
pub trait Submit {
    /// Submit a generation request and return the parsed response.
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError>;
}

/// Single-shot HTTP transport for a configured generation endpoint.
///
/// The authorization header is rendered once from the configuration and
/// reused for every request issued through this instance. Each call performs
/// exactly one POST; the warming state is reported as
/// [`ApiError::Warming`] for a decorator to handle.
#[derive(Debug)]
pub struct HttpSubmit {
    client: reqwest::Client,
    api_url: String,
    auth_header: String,
}

impl HttpSubmit {
    /// Build a transport from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(HttpSubmit {
            client,
            api_url: config.api_url.clone(),
            auth_header: format!("Bearer {}", config.api_key),
        })
    }

    /// Parse a `Retry-After` header value as whole seconds.
    fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
        response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

impl Submit for HttpSubmit {
    #[instrument(level = "debug", skip_all)]
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError> {
        let t0 = Instant::now();
        let response = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Generation request completed");

        if status == StatusCode::SERVICE_UNAVAILABLE {
            let retry_after = Self::parse_retry_after(&response);
            return Err(ApiError::Warming { retry_after });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<GenerationResponse>(&body)?;
        Ok(parsed)
    }
}

/// Wrapper that adds bounded warm-up retry logic to any [`Submit`] implementation.
///
/// While the provider reports the model as loading, this decorator sleeps and
/// re-issues the identical request. Unlike a naive sleep-and-recurse, the
/// loop stops once either the attempt cap or the total sleep budget is
/// exhausted and surfaces [`ApiError::WarmupTimeout`] so callers never block
/// indefinitely.
///
/// # Backoff Strategy
///
/// ```text
/// delay = retry_after                              (provider-supplied)
///       | min(base_delay * 2^(attempt-1), cap)     (otherwise)
/// delay = min(delay, cap) + random_jitter(0..250ms)
/// ```
pub struct RetrySubmit<T> {
    /// The underlying transport to wrap.
    inner: T,
    /// Maximum number of warm-up retries before giving up.
    max_retries: usize,
    /// Total sleep budget across all retries.
    max_wait: Duration,
    /// Initial delay when the provider suggests none (doubles per attempt).
    base_delay: Duration,
    /// Cap applied to every individual delay.
    max_delay: Duration,
}

impl<T> RetrySubmit<T>
where
    T: Submit,
{
    /// Wrap a transport with the default retry bounds.
    pub fn new(inner: T) -> Self {
        Self::with_bounds(inner, DEFAULT_MAX_RETRIES, DEFAULT_MAX_WAIT)
    }

    /// Wrap a transport with explicit attempt and elapsed-wait bounds.
    pub fn with_bounds(inner: T, max_retries: usize, max_wait: Duration) -> Self {
        RetrySubmit {
            inner,
            max_retries,
            max_wait,
            base_delay: DEFAULT_RETRY_DELAY,
            max_delay: MAX_RETRY_DELAY,
        }
    }

    /// Override the fallback backoff base. Mainly for tests that should not
    /// sleep for real-provider durations.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Compute the delay before the next attempt.
    ///
    /// `attempt` is 1-based: the first retry uses `base_delay`, the second
    /// twice that, and so on, unless the provider supplied its own delay.
    fn retry_delay(&self, attempt: usize, retry_after: Option<Duration>) -> Duration {
        let delay = match retry_after {
            Some(suggested) => suggested,
            None => self
                .base_delay
                .saturating_mul(1u32 << (attempt - 1).min(31) as u32),
        };
        delay.min(self.max_delay)
    }
}

impl<T> Submit for RetrySubmit<T>
where
    T: Submit,
{
    #[instrument(level = "info", skip_all)]
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError> {
        let mut attempts = 0usize;
        let mut waited = Duration::ZERO;

        loop {
            attempts += 1;
            match self.inner.submit(request).await {
                Ok(response) => return Ok(response),
                Err(ApiError::Warming { retry_after }) => {
                    let retries_so_far = attempts - 1;
                    if retries_so_far >= self.max_retries {
                        warn!(attempts, waited_secs = waited.as_secs(), "Model warm-up exhausted retry attempts");
                        return Err(ApiError::WarmupTimeout { attempts, waited });
                    }

                    let jitter = Duration::from_millis(rng().random_range(0..=250));
                    let delay = self.retry_delay(attempts, retry_after) + jitter;
                    // Budget check includes jitter so total sleep never
                    // overshoots max_wait.
                    if waited + delay > self.max_wait {
                        warn!(attempts, waited_secs = waited.as_secs(), "Model warm-up exhausted wait budget");
                        return Err(ApiError::WarmupTimeout { attempts, waited });
                    }

                    warn!(
                        attempt = attempts,
                        max = self.max_retries,
                        ?delay,
                        provider_suggested = retry_after.is_some(),
                        "Model loading; retrying after delay"
                    );
                    sleep(delay).await;
                    waited += delay;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

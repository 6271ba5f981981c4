//! # Gridiron Press
//!
//! An article-generation pipeline over a hosted text-generation API.
//! Configuration, transport, and generation are small independent pieces
//! assembled at call time:
//!
//! 1. **[`config::Config`]**: loads and validates the API credential and
//!    endpoint from the environment, failing fast before any network call
//! 2. **[`api::HttpSubmit`] + [`api::RetrySubmit`]**: authenticated POST to
//!    the generation endpoint with a bounded retry loop for the provider's
//!    "model loading" state
//! 3. **[`generator::ArticleGenerator`]**: owns the prompt template and
//!    sampling parameters, normalizes the heterogeneous response shapes, and
//!    truncates output at the expert-analysis marker
//!
//! The pipeline is strictly linear and returns a plain `String` article;
//! display and publication are the caller's concern.
//!
//! ## Example
//!
//! ```ignore
//! let config = Config::from_env()?;
//! let transport = RetrySubmit::new(HttpSubmit::new(&config)?);
//! let generator = ArticleGenerator::new(transport);
//! let article = generator.generate(None).await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod utils;

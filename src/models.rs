//! Wire types for the text-generation API.
//!
//! This module defines the request payload and the response shapes used when
//! talking to a hosted text-generation endpoint:
//! - [`GenerationRequest`]: prompt text plus sampling parameters
//! - [`GenerationParameters`]: the fixed sampling knobs with article defaults
//! - [`GenerationResponse`]: the provider's reply, which arrives in one of
//!   several shapes depending on model and hosting mode
//!
//! The response shape is resolved exactly once, at the serde boundary, into a
//! tagged union. Everything downstream calls [`GenerationResponse::text`] and
//! never inspects raw JSON.

use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every generation request.
///
/// Field names match the provider wire format exactly. The defaults are the
/// article-generation profile: warm but not chaotic sampling, enough tokens
/// for a four-section article, and no prompt echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum number of tokens to generate.
    pub max_new_tokens: u32,
    /// Nucleus-sampling threshold.
    pub top_p: f64,
    /// Penalty applied to repeated tokens.
    pub repetition_penalty: f64,
    /// Whether to sample (as opposed to greedy decoding).
    pub do_sample: bool,
    /// Whether the response should echo the prompt before the completion.
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            temperature: 0.72,
            max_new_tokens: 850,
            top_p: 0.92,
            repetition_penalty: 1.15,
            do_sample: true,
            return_full_text: false,
        }
    }
}

/// A complete generation request: prompt plus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The prompt text.
    pub inputs: String,
    /// Sampling parameters.
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    /// Build a request for the given prompt with default parameters.
    pub fn new(inputs: impl Into<String>) -> Self {
        GenerationRequest {
            inputs: inputs.into(),
            parameters: GenerationParameters::default(),
        }
    }
}

/// One generated completion.
///
/// `generated_text` defaults to empty when the provider omits the field, so
/// a malformed-but-JSON response degrades to an empty article rather than a
/// decode error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedText {
    /// The model's output text.
    #[serde(default)]
    pub generated_text: String,
}

/// The provider's reply, in whichever shape it arrives.
///
/// Hosted inference endpoints answer with either a list of completions or a
/// bare completion object; anything else is kept as raw JSON. The variants
/// are tried in order, so a list is never misread as `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    /// A sequence of completions; the first one wins.
    Batch(Vec<GeneratedText>),
    /// A single completion object.
    Single(GeneratedText),
    /// Any other JSON shape, stringified on extraction.
    Other(serde_json::Value),
}

impl GenerationResponse {
    /// Extract the generated text from whichever shape this response took.
    ///
    /// An empty batch or a completion without text yields an empty string.
    pub fn text(&self) -> String {
        match self {
            GenerationResponse::Batch(items) => items
                .first()
                .map(|item| item.generated_text.clone())
                .unwrap_or_default(),
            GenerationResponse::Single(item) => item.generated_text.clone(),
            GenerationResponse::Other(value) => value.to_string(),
        }
    }
}

//! Article generation: prompt template, submission, and post-processing.
//!
//! [`ArticleGenerator`] owns the structured prompt template and the fixed
//! sampling parameters, submits generation requests through any [`Submit`]
//! implementation, normalizes the heterogeneous response shapes into plain
//! text, and truncates the output at the expert-analysis marker.
//!
//! The analysis section is requested from the model (it improves the quality
//! of the preceding sections) but never published, so everything from the
//! marker onward is cut before the article is returned.

use crate::api::Submit;
use crate::error::ApiError;
use crate::models::GenerationRequest;
use tracing::{debug, instrument, warn};

/// Literal heading at which generated output is truncated.
///
/// Matched exactly, case-sensitive. If the model varies the heading or omits
/// the section, the full text is returned untruncated.
pub const ANALYSIS_MARKER: &str = "## Expert Analysis";

/// Structured prompt template for a full NFL news article.
const BASE_PROMPT: &str = "\
Generate a comprehensive NFL news article with these sections:

## Recent Game Highlights
[Summarize key games from last week with scores and standout moments]

## Player Performances
[Detail top 3 offensive and defensive players with stats]

## Upcoming Matchups
[Preview next week's must-watch games with predictions]

## Expert Analysis
[Include quotes and insights from league analysts]

Use markdown-style headers and bullet points where appropriate:";

/// Generates structured NFL articles through a text-generation backend.
pub struct ArticleGenerator<T> {
    client: T,
}

impl<T> ArticleGenerator<T>
where
    T: Submit,
{
    /// Create a generator over the given transport.
    pub fn new(client: T) -> Self {
        ArticleGenerator { client }
    }

    /// Generate an article, optionally from a caller-supplied prompt.
    ///
    /// A custom prompt fully replaces the template's `inputs`; the sampling
    /// parameters are always the fixed defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request cannot be completed. Response
    /// content problems (missing text field, odd shapes) are not errors; they
    /// degrade to an empty or stringified article.
    #[instrument(level = "info", skip_all, fields(custom = custom_prompt.is_some()))]
    pub async fn generate(&self, custom_prompt: Option<&str>) -> Result<String, ApiError> {
        let prompt = custom_prompt.unwrap_or(BASE_PROMPT);
        let request = GenerationRequest::new(prompt);

        let response = self.client.submit(&request).await?;
        let text = response.text();
        if text.is_empty() {
            warn!("Response contained no generated text");
        }

        let article = trim_at_marker(&text);
        debug!(
            raw_len = text.len(),
            article_len = article.len(),
            "Generated article"
        );
        Ok(article)
    }
}

/// Render a generation failure as the user-visible diagnostic string.
///
/// The fixed prefix lets interactive callers recognize a failed run at a
/// glance; programmatic callers should branch on the [`ApiError`] itself.
pub fn error_message(e: &ApiError) -> String {
    format!("Error generating article: {e}")
}

/// Keep only the text before the first [`ANALYSIS_MARKER`], trimmed.
fn trim_at_marker(text: &str) -> String {
    match text.find(ANALYSIS_MARKER) {
        Some(idx) => text[..idx].trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationParameters, GenerationResponse};
    use std::sync::Mutex;

    /// Stub transport that records the request and returns a canned body.
    struct CannedSubmit {
        body: String,
        seen: Mutex<Option<GenerationRequest>>,
    }

    impl CannedSubmit {
        fn new(body: &str) -> Self {
            CannedSubmit {
                body: body.to_string(),
                seen: Mutex::new(None),
            }
        }
    }

    impl Submit for CannedSubmit {
        async fn submit(
            &self,
            request: &GenerationRequest,
        ) -> Result<GenerationResponse, ApiError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            Ok(serde_json::from_str(&self.body).unwrap())
        }
    }

    /// Stub transport that always fails at the transport level.
    struct FailingSubmit;

    impl Submit for FailingSubmit {
        async fn submit(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GenerationResponse, ApiError> {
            Err(ApiError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                body: "upstream unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_truncates_at_analysis_marker() {
        let generator = ArticleGenerator::new(CannedSubmit::new(
            r#"[{"generated_text": "  X## Expert AnalysisY"}]"#,
        ));
        let article = generator.generate(None).await.unwrap();
        assert_eq!(article, "X");
    }

    #[tokio::test]
    async fn test_text_without_marker_passes_through() {
        let generator = ArticleGenerator::new(CannedSubmit::new(
            r#"{"generated_text": "  Plain text, no marker  "}"#,
        ));
        let article = generator.generate(None).await.unwrap();
        assert_eq!(article, "Plain text, no marker");
    }

    #[tokio::test]
    async fn test_missing_text_field_yields_empty_article() {
        let generator =
            ArticleGenerator::new(CannedSubmit::new(r#"{"something_else": true}"#));
        let article = generator.generate(None).await.unwrap();
        assert_eq!(article, "");
    }

    #[tokio::test]
    async fn test_default_prompt_has_all_sections() {
        let generator = ArticleGenerator::new(CannedSubmit::new(r#"[{"generated_text": ""}]"#));
        generator.generate(None).await.unwrap();

        let request = generator.client.seen.lock().unwrap().take().unwrap();
        for section in [
            "## Recent Game Highlights",
            "## Player Performances",
            "## Upcoming Matchups",
            "## Expert Analysis",
        ] {
            assert!(request.inputs.contains(section), "missing {section}");
        }
        assert_eq!(request.parameters, GenerationParameters::default());
    }

    #[tokio::test]
    async fn test_custom_prompt_replaces_inputs_only() {
        let generator = ArticleGenerator::new(CannedSubmit::new(r#"[{"generated_text": "ok"}]"#));
        generator
            .generate(Some("Cover the divisional round"))
            .await
            .unwrap();

        let request = generator.client.seen.lock().unwrap().take().unwrap();
        assert_eq!(request.inputs, "Cover the divisional round");
        assert_eq!(request.parameters, GenerationParameters::default());
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_typed_error() {
        let generator = ArticleGenerator::new(FailingSubmit);
        let err = generator.generate(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[tokio::test]
    async fn test_error_message_carries_fixed_prefix() {
        let generator = ArticleGenerator::new(FailingSubmit);
        let err = generator.generate(None).await.unwrap_err();
        let message = error_message(&err);
        assert!(message.starts_with("Error generating article:"));
        assert!(message.contains("502"));
    }

    #[test]
    fn test_trim_at_marker_uses_first_occurrence() {
        let text = "lead## Expert Analysismiddle## Expert Analysistail";
        assert_eq!(trim_at_marker(text), "lead");
    }

    #[test]
    fn test_marker_casing_must_match_exactly() {
        let text = "Article body\n## EXPERT ANALYSIS\nshouting variant stays";
        assert_eq!(trim_at_marker(text), text.trim());
    }
}

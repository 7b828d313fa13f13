//! Google Gemini `generateContent` provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionProvider, ProviderError};

/// Finish reasons that mean the provider refused to produce (or withheld) output.
const REJECTING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
];

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    status: Option<String>,
}

/// Calls the Gemini REST API. The HTTP client carries no timeout of its own;
/// `CompletionClient` enforces it per attempt.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_base: &str, model: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client for Gemini")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                api_base.trim_end_matches('/'),
                model
            ),
            api_key,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transient(format!("HTTP error: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transient(format!("failed to read response body: {e}")))?;

        interpret_response(status, &text)
    }
}

/// Maps a raw Gemini HTTP response onto completion text or a classified failure.
fn interpret_response(status: StatusCode, body: &str) -> Result<String, ProviderError> {
    if !status.is_success() {
        let (message, api_status) = match serde_json::from_str::<ApiError>(body) {
            Ok(e) => (e.error.message, e.error.status),
            Err(_) => (body.to_string(), None),
        };

        if status.is_server_error() {
            return Err(ProviderError::Transient(format!("status {status}: {message}")));
        }
        // Quota exhaustion surfaces as 429 RESOURCE_EXHAUSTED; waiting a second won't fix it.
        let label = api_status.unwrap_or_else(|| status.as_u16().to_string());
        return Err(ProviderError::Rejected(format!("{label}: {message}")));
    }

    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Transient(format!("unreadable provider response: {e}")))?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ProviderError::Rejected(format!("prompt blocked: {reason}")));
    }

    if let Some(usage) = &parsed.usage_metadata {
        debug!(
            "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Transient("provider returned no candidates".to_string()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if REJECTING_FINISH_REASONS.contains(&reason) {
            return Err(ProviderError::Rejected(format!("response withheld: {reason}")));
        }
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::Transient(
            "provider returned empty content".to_string(),
        ));
    }

    Ok(text)
}

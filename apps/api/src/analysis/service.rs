//! Analysis Service — runs one request through the pipeline.
//!
//! Flow: validate input → build prompt → complete → extract → validate schema.
//! Each call is independent; nothing is cached or shared between requests
//! beyond the completion client's concurrency permits.

use std::fmt;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::analysis::error::AnalysisError;
use crate::analysis::extractor::extract;
use crate::analysis::models::AnalysisResult;
use crate::analysis::prompt_builder::PromptBuilder;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::schema::{validate_result, SchemaKind};
use crate::llm_client::CompletionClient;

/// Pipeline progress. Linear; a failure at any point ends in `Errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    PromptBuilt,
    CompletionRequested,
    ResponseExtracted,
    Validated,
    Done,
    Errored,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<&AnalysisRequest> for SchemaKind {
    fn from(request: &AnalysisRequest) -> Self {
        match request {
            AnalysisRequest::Resume(_) => SchemaKind::Resume,
            AnalysisRequest::Research(_) => SchemaKind::Research,
            AnalysisRequest::BusinessIdea(_) => SchemaKind::BusinessIdea,
            AnalysisRequest::Interview(_) => SchemaKind::Interview,
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    client: CompletionClient,
    prompts: PromptBuilder,
}

impl AnalysisService {
    pub fn new(client: CompletionClient, prompts: PromptBuilder) -> Self {
        Self { client, prompts }
    }

    /// Runs `request` end to end. Returns a fully validated result or a typed error,
    /// never a partially populated one.
    #[instrument(
        name = "analyze",
        skip_all,
        fields(request_id = %Uuid::new_v4(), kind = request.kind())
    )]
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let mut stage = Stage::Received;
        let outcome = self.run(&request, &mut stage).await;

        match &outcome {
            Ok(_) => info!(stage = %Stage::Done, "analysis complete"),
            Err(e) => warn!(
                stage = %Stage::Errored,
                failed_after = %stage,
                error_kind = %e.kind(),
                retryable = e.is_retryable(),
                "analysis failed: {e}"
            ),
        }

        outcome
    }

    async fn run(
        &self,
        request: &AnalysisRequest,
        stage: &mut Stage,
    ) -> Result<AnalysisResult, AnalysisError> {
        request.validate()?;

        let prompt = self.prompts.build(request);
        *stage = Stage::PromptBuilt;
        debug!(prompt_chars = prompt.chars().count(), "prompt built");

        *stage = Stage::CompletionRequested;
        let raw = self.client.complete(&prompt).await?;

        let schema = SchemaKind::from(request);
        let candidate = if schema.expects_json() {
            extract(&raw)
        } else {
            raw.trim()
        };
        *stage = Stage::ResponseExtracted;

        // A malformed reply usually means a template defect; keep the raw text for diagnosis.
        let result = validate_result(candidate, schema).inspect_err(|e| {
            warn!(
                provider = self.client.provider_name(),
                raw_response = %raw,
                "provider response failed validation: {e}"
            );
        })?;
        *stage = Stage::Validated;
        debug!("response validated against {schema:?} schema");

        Ok(result)
    }
}

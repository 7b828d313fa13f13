//! Axum route handlers for the analysis tools.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::models::AnalysisResult;
use crate::analysis::request::{
    AnalysisRequest, BusinessIdeaInput, InterviewInput, ResearchInput, ResumeInput,
};
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

/// Multipart field carrying the uploaded paper.
const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/analyze
///
/// Generic entry point. The body is a tagged `AnalysisRequest` (`kind` selects the tool).
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.analysis.analyze(request).await?;
    Ok(Json(result))
}

/// POST /api/parse-resume
///
/// Scores a resume against a job description.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResumeInput>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.analysis.analyze(AnalysisRequest::Resume(input)).await?;
    Ok(Json(result))
}

/// POST /api/analyze-research
///
/// Summarizes a research paper from its extracted text (`pdfText` or `paperText`).
pub async fn handle_analyze_research(
    State(state): State<AppState>,
    AppJson(input): AppJson<ResearchInput>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .analysis
        .analyze(AnalysisRequest::Research(input))
        .await?;
    Ok(Json(result))
}

/// POST /api/analyze-research/upload
///
/// Same as `handle_analyze_research`, but takes the PDF itself as multipart field `file`
/// and extracts its text server-side.
pub async fn handle_research_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut pdf: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(data);
        }
    }

    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{UPLOAD_FIELD}'"))
    })?;
    info!("Extracting text from uploaded PDF ({} bytes)", pdf.len());

    let paper_text = extract_pdf_text(pdf).await?;
    let result = state
        .analysis
        .analyze(AnalysisRequest::Research(ResearchInput { paper_text }))
        .await?;
    Ok(Json(result))
}

/// POST /api/business-idea
///
/// Generates a free-form business idea. Returns `{ "idea": "..." }`.
pub async fn handle_business_idea(
    State(state): State<AppState>,
    AppJson(input): AppJson<BusinessIdeaInput>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .analysis
        .analyze(AnalysisRequest::BusinessIdea(input))
        .await?;
    Ok(Json(result))
}

/// POST /api/interview-questions
///
/// Generates mock interview questions with model answers for a role.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    AppJson(input): AppJson<InterviewInput>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .analysis
        .analyze(AnalysisRequest::Interview(input))
        .await?;
    Ok(Json(result))
}

/// PDF parsing is CPU-bound and synchronous, so it runs on the blocking pool.
/// `pdf-extract` can panic on malformed files; that counts as an unreadable upload.
async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::UnprocessableEntity("Could not read PDF: parser aborted".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))
}

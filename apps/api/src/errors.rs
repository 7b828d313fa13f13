use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::error::{AnalysisError, ErrorKind};

/// Seconds a client should wait before retrying after a provider outage.
const RETRY_AFTER_SECS: &str = "5";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// `Json` extractor whose rejections use the service's error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message, details) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorKind::InvalidInput.as_str(),
                msg.clone(),
                None,
            ),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
                None,
            ),
            AppError::Analysis(e) => analysis_status(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), kind, "request failed: {self}");
        }

        let retry_hint = matches!(&self, AppError::Analysis(e) if e.is_retryable());

        let body = Json(ErrorBody {
            kind,
            message,
            details,
        });

        let mut response = (status, body).into_response();
        if retry_hint {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(RETRY_AFTER_SECS),
            );
        }
        response
    }
}

fn analysis_status(e: &AnalysisError) -> (StatusCode, &'static str, String, Option<String>) {
    let kind = e.kind();
    match (kind, e) {
        (_, AnalysisError::InvalidInput(msg)) => {
            (StatusCode::BAD_REQUEST, kind.as_str(), msg.clone(), None)
        }
        (ErrorKind::ProviderUnavailable, _) => (
            StatusCode::SERVICE_UNAVAILABLE,
            kind.as_str(),
            "The analysis provider is temporarily unavailable, please retry".to_string(),
            Some(e.to_string()),
        ),
        (ErrorKind::Timeout, _) => (
            StatusCode::GATEWAY_TIMEOUT,
            kind.as_str(),
            "The analysis took too long, please retry".to_string(),
            Some(e.to_string()),
        ),
        (ErrorKind::Rejected, _) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            kind.as_str(),
            "The analysis request was declined by the provider".to_string(),
            Some(e.to_string()),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            kind.as_str(),
            "Analysis failed, please retry".to_string(),
            Some(e.to_string()),
        ),
    }
}

use std::fmt;

use thiserror::Error;

use crate::llm_client::CompletionError;

/// Failure of the strict parse-and-check step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    #[error("response does not match schema at {path}: expected {expected}, found {actual}")]
    SchemaMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Everything `AnalysisService::analyze` can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Flat view of `AnalysisError` for callers that only need to branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    ProviderUnavailable,
    Rejected,
    Timeout,
    Malformed,
    SchemaMismatch,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::ProviderUnavailable => "PROVIDER_UNAVAILABLE",
            ErrorKind::Rejected => "REJECTED",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Malformed => "MALFORMED",
            ErrorKind::SchemaMismatch => "SCHEMA_MISMATCH",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidInput(_) => ErrorKind::InvalidInput,
            AnalysisError::Completion(CompletionError::ProviderUnavailable { .. }) => {
                ErrorKind::ProviderUnavailable
            }
            AnalysisError::Completion(CompletionError::Rejected(_)) => ErrorKind::Rejected,
            AnalysisError::Completion(CompletionError::Timeout(_)) => ErrorKind::Timeout,
            AnalysisError::Validation(ValidationError::Malformed(_)) => ErrorKind::Malformed,
            AnalysisError::Validation(ValidationError::SchemaMismatch { .. }) => {
                ErrorKind::SchemaMismatch
            }
        }
    }

    /// Whether the caller may resubmit the same request and reasonably expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ProviderUnavailable | ErrorKind::Timeout
        )
    }
}

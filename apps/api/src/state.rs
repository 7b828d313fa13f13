use crate::analysis::service::AnalysisService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The analysis pipeline. Cheap to clone; holds no per-request state.
    pub analysis: AnalysisService,
}

pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers;
use crate::state::AppState;

/// Uploaded papers may exceed axum's 2 MB default body limit.
const UPLOAD_BODY_LIMIT: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/parse-resume", post(handlers::handle_parse_resume))
        .route(
            "/api/analyze-research",
            post(handlers::handle_analyze_research),
        )
        .route(
            "/api/analyze-research/upload",
            post(handlers::handle_research_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/business-idea", post(handlers::handle_business_idea))
        .route(
            "/api/interview-questions",
            post(handlers::handle_interview_questions),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::prompt_builder::PromptBuilder;
    use crate::analysis::service::AnalysisService;
    use crate::llm_client::testing::{ScriptedProvider, Step};
    use crate::llm_client::{CompletionClient, ProviderError};

    fn router(provider: Arc<ScriptedProvider>) -> Router {
        let client = CompletionClient::new(provider, Duration::from_secs(30), 2);
        build_router(AppState {
            analysis: AnalysisService::new(client, PromptBuilder::new(3)),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn resume_reply() -> Value {
        json!({
            "overallScore": 82,
            "skills": {"matched": ["React"], "missing": ["GraphQL"]},
            "experience": {"score": 80, "feedback": "Strong"},
            "education": {"score": 70, "feedback": "Adequate"},
            "recommendations": ["Add metrics"]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(Arc::new(ScriptedProvider::replying("")));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_parse_resume_returns_analysis() {
        let provider = Arc::new(ScriptedProvider::replying(&format!(
            "```json\n{}\n```",
            resume_reply()
        )));
        let response = router(provider)
            .oneshot(post_json(
                "/api/parse-resume",
                json!({"resumeText": "5 years React...", "jobDescription": "Need React dev..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, resume_reply());
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request_without_provider_call() {
        let provider = Arc::new(ScriptedProvider::replying(&resume_reply().to_string()));
        let response = router(provider.clone())
            .oneshot(post_json(
                "/api/parse-resume",
                json!({"resumeText": "5 years React..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["kind"], "INVALID_INPUT");
        assert_eq!(body["message"], "Missing required fields: jobDescription");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_tagged_analyze_endpoint_generates_business_idea() {
        let provider = Arc::new(ScriptedProvider::replying("1. Business Concept: a bakery"));
        let response = router(provider)
            .oneshot(post_json(
                "/api/v1/analyze",
                json!({"kind": "businessIdea", "industry": "Food", "interests": "Baking", "budget": "$5k"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await,
            json!({"idea": "1. Business Concept: a bakery"})
        );
    }

    #[tokio::test]
    async fn test_research_accepts_pdf_text_field() {
        let point = json!({"point": "P", "description": "D"});
        let reply = json!({
            "title": "T", "journal": "J", "year": "2021",
            "contributions": [point, point, point],
            "limitations": [point, point, point],
            "areaOfFocus": "Systems",
            "methodology": {"approach": "Benchmarks", "tools": ["Rust"]},
            "futureWork": ["More data"]
        });
        let provider = Arc::new(ScriptedProvider::replying(&reply.to_string()));
        let response = router(provider)
            .oneshot(post_json(
                "/api/analyze-research",
                json!({"pdfText": "Abstract. We benchmark..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, reply);
    }

    #[tokio::test]
    async fn test_interview_questions() {
        let reply = json!({"questions": [
            {"question": "Explain borrowing.", "answer": "References without ownership."}
        ]});
        let provider = Arc::new(ScriptedProvider::replying(&reply.to_string()));
        let response = router(provider.clone())
            .oneshot(post_json(
                "/api/interview-questions",
                json!({"jobPosition": "Rust Engineer", "jobDescription": "Services", "yearsOfExperience": "3"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, reply);
        assert!(provider.prompts()[0].contains("write 3 interview questions"));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_server_error_with_details() {
        let provider = Arc::new(ScriptedProvider::replying("Sure! Here is my analysis..."));
        let response = router(provider)
            .oneshot(post_json(
                "/api/parse-resume",
                json!({"resumeText": "5 years React...", "jobDescription": "Need React dev..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["kind"], "MALFORMED");
        assert_eq!(body["message"], "Analysis failed, please retry");
        assert!(body["details"].is_string());
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_outage_is_service_unavailable() {
        let provider = Arc::new(ScriptedProvider::new(vec![Step::Reply(Err(
            ProviderError::Transient("503".into()),
        ))]));
        let response = router(provider.clone())
            .oneshot(post_json(
                "/api/parse-resume",
                json!({"resumeText": "5 years React...", "jobDescription": "Need React dev..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().contains_key(header::RETRY_AFTER));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_upload_without_file_is_bad_request() {
        let body = "--BOUNDARY\r\n\
            Content-Disposition: form-data; name=\"note\"\r\n\r\n\
            hello\r\n\
            --BOUNDARY--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze-research/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let provider = Arc::new(ScriptedProvider::replying("{}"));
        let response = router(provider.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_body_uses_error_body() {
        let provider = Arc::new(ScriptedProvider::replying("{}"));
        for body in [
            json!({"resumeText": "5 years React..."}),
            json!({"kind": "horoscope"}),
        ] {
            let response = router(provider.clone())
                .oneshot(post_json("/api/v1/analyze", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = read_json(response).await;
            assert_eq!(body["kind"], "INVALID_INPUT");
            assert!(!body["message"].as_str().unwrap().is_empty());
        }

        let response = router(provider.clone())
            .oneshot(post_json(
                "/api/parse-resume",
                json!({"resumeText": 5, "jobDescription": "Need React dev..."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["kind"], "INVALID_INPUT");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_of_unreadable_pdf_is_unprocessable() {
        let body = "--BOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"paper.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            this is not a pdf\r\n\
            --BOUNDARY--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze-research/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let provider = Arc::new(ScriptedProvider::replying("{}"));
        let response = router(provider.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["message"].as_str().unwrap().starts_with("Could not read PDF"));
        assert_eq!(provider.calls(), 0);
    }
}

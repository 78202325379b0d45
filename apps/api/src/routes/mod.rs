pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze;
use crate::editor::handlers::{
    handle_analyze_and_edit, handle_edit_latex, handle_edit_latex_upload,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(handle_analyze))
        // Editor API
        .route("/api/v1/resumes/edit-latex", post(handle_edit_latex))
        .route(
            "/api/v1/resumes/edit-latex/upload",
            post(handle_edit_latex_upload),
        )
        .route("/api/v1/analyze-and-edit", post(handle_analyze_and_edit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    const JOB: &str = "We are looking for a Full Stack Developer with experience in \
        Python and Django, Database design and SQL, Cloud platforms (AWS/Azure).";

    const RESUME: &str = "Software engineer with 3 years of experience. Built Django \
        services and developed React dashboards. Bachelor of Science.";

    const DOC: &str = r"\documentclass{article}
\begin{document}
\section{Experience}
\resumeItemListStart
\resumeItem{Built a \textbf{billing} service.}
\resumeItemListEnd
\section{Technical Skills}
\textbf{Languages}{: Java, Python} \\
\end{document}
";

    const BROKEN_DOC: &str = "\\section{Skills}\n\\textbf{Languages}{: Java, Go\n\\section{Experience}\n";

    fn app() -> Router {
        build_router(AppState::from_config(Config::default()))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(file_name: &str, document: &str, job: &str) -> Request<Body> {
        let boundary = "matcherboundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"latex_file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/x-tex\r\n\r\n\
             {document}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"job_description\"\r\n\r\n\
             {job}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/edit-latex/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "matcher-api");
        assert_eq!(body["budget_strategy"], "hashed");
        assert_eq!(body["term_source"], "catalog");
    }

    #[tokio::test]
    async fn test_analyze_returns_bounded_result() {
        let (status, body) = send(
            app(),
            post_json("/api/v1/analyze", json!({"resume_text": RESUME, "job_description": JOB})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");

        let score = body["current_score"].as_i64().unwrap();
        assert!((20..=90).contains(&score));
        let potential = body["potential_score"].as_i64().unwrap();
        assert!(potential <= 95 && potential >= score);
        assert!(body["recommendations"].as_array().unwrap().len() <= 5);
        assert!(body["keywords_to_add"].as_array().unwrap().len() <= 8);
        assert!(body["summary"].is_string());
        assert_eq!(body["breakdown"]["final_score"], body["current_score"]);
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_job_text() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/analyze",
                json!({"resume_text": RESUME, "job_description": "   Rust dev   "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_resume() {
        let (status, _) = send(
            app(),
            post_json("/api/v1/analyze", json!({"resume_text": "", "job_description": JOB})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fixed_budget_from_config() {
        let config = Config {
            improvement_budget: Some(7),
            ..Config::default()
        };
        let app = build_router(AppState::from_config(config));
        let (_, body) = send(
            app,
            post_json("/api/v1/analyze", json!({"resume_text": RESUME, "job_description": JOB})),
        )
        .await;
        assert_eq!(body["total_potential_improvement"], 7);
        assert_eq!(body["budget_strategy"], "fixed");
    }

    #[tokio::test]
    async fn test_edit_latex_returns_edit_and_scores() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/resumes/edit-latex",
                json!({"latex_content": DOC, "job_description": JOB}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");

        let edited = body["edited_document"].as_str().unwrap();
        assert!(edited.contains(r"\textbf{Languages}{: Java, Python, Django, AWS}"));
        assert!(edited.contains("leveraging Python technologies."));
        assert_eq!(body["original_document"], DOC);

        let original = body["original_score"].as_i64().unwrap();
        let new = body["new_score"].as_i64().unwrap();
        assert_eq!(body["score_improvement"].as_i64().unwrap(), new - original);
    }

    #[tokio::test]
    async fn test_edit_latex_failure_returns_original_document() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/resumes/edit-latex",
                json!({"latex_content": BROKEN_DOC, "job_description": JOB}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "EDIT_FAILED");
        assert_eq!(body["original_document"], BROKEN_DOC);
    }

    #[tokio::test]
    async fn test_edit_latex_rejects_empty_document() {
        let (status, _) = send(
            app(),
            post_json(
                "/api/v1/resumes/edit-latex",
                json!({"latex_content": "  ", "job_description": JOB}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_edits_tex_file() {
        let (status, body) = send(app(), multipart_request("resume.tex", DOC, JOB)).await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert!(body["edited_document"]
            .as_str()
            .unwrap()
            .contains("Django, AWS"));
        assert_eq!(body["term_source"], "catalog");
    }

    #[tokio::test]
    async fn test_upload_rejects_other_extensions() {
        let (status, body) = send(app(), multipart_request("resume.pdf", DOC, JOB)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only .tex files are supported");
    }

    #[tokio::test]
    async fn test_analyze_and_edit_without_document() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/analyze-and-edit",
                json!({"resume_text": RESUME, "job_description": JOB}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["analysis"]["current_score"].is_number());
        assert_eq!(body["job_description"], JOB);
        assert!(body.get("latex_editing").is_none());
    }

    #[tokio::test]
    async fn test_analyze_and_edit_reports_edit_failure_inline() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/analyze-and-edit",
                json!({"resume_text": RESUME, "job_description": JOB, "latex_content": BROKEN_DOC}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["latex_editing"]["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to edit resume"));
        assert!(body["analysis"]["summary"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_and_edit_with_document() {
        let (status, body) = send(
            app(),
            post_json(
                "/api/v1/analyze-and-edit",
                json!({"resume_text": RESUME, "job_description": JOB, "latex_content": DOC}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["latex_editing"]["edited_document"].is_string());
        assert!(body["latex_editing"]["new_score"].is_number());
    }
}

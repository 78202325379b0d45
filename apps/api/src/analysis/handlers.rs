use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::state::AppState;

/// Shortest job description (trimmed, in characters) worth analyzing.
pub const MIN_JOB_TEXT_CHARS: usize = 50;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    validate_resume_text(&req.resume_text)?;
    validate_job_text(&req.job_description)?;
    Ok(Json(state.analyzer.analyze(&req.resume_text, &req.job_description)))
}

pub fn validate_job_text(job_text: &str) -> Result<(), AppError> {
    if job_text.trim().chars().count() < MIN_JOB_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "Job description must be at least {MIN_JOB_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_resume_text(resume_text: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is empty".to_string()));
    }
    Ok(())
}

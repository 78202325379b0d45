use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::handlers::{validate_job_text, validate_resume_text};
use crate::analysis::scoring::score;
use crate::analysis::AnalysisResult;
use crate::editor::plain_text::latex_to_plain_text;
use crate::editor::{EditOutcome, EditResult};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EditLatexRequest {
    pub latex_content: String,
    pub job_description: String,
    pub resume_text: Option<String>,
}

/// An edit result plus the score of the document before and after editing.
#[derive(Debug, Serialize)]
pub struct ScoredEdit {
    #[serde(flatten)]
    pub result: EditResult,
    pub original_score: i32,
    pub new_score: i32,
    pub score_improvement: i32,
}

#[derive(Deserialize)]
pub struct AnalyzeAndEditRequest {
    pub resume_text: String,
    pub job_description: String,
    pub latex_content: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LatexEditing {
    Edited(ScoredEdit),
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct AnalyzeAndEditResponse {
    pub analysis: AnalysisResult,
    pub job_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex_editing: Option<LatexEditing>,
}

/// POST /api/v1/resumes/edit-latex
pub async fn handle_edit_latex(
    State(state): State<AppState>,
    Json(req): Json<EditLatexRequest>,
) -> Result<Json<ScoredEdit>, AppError> {
    validate_document(&req.latex_content)?;
    validate_job_text(&req.job_description)?;
    let scored = edit_and_score(
        &state,
        &req.latex_content,
        &req.job_description,
        req.resume_text.as_deref(),
    )?;
    Ok(Json(scored))
}

/// POST /api/v1/resumes/edit-latex/upload
/// Multipart fields: `latex_file` (.tex), `job_description`, optional `resume_text`.
pub async fn handle_edit_latex_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoredEdit>, AppError> {
    let mut latex_content = None;
    let mut job_description = None;
    let mut resume_text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "latex_file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if !file_name.to_ascii_lowercase().ends_with(".tex") {
                    return Err(AppError::Validation(
                        "Only .tex files are supported".to_string(),
                    ));
                }
                latex_content = Some(read_text(field).await?);
            }
            "job_description" => job_description = Some(read_text(field).await?),
            "resume_text" => resume_text = Some(read_text(field).await?),
            other => debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    let latex_content = latex_content
        .ok_or_else(|| AppError::Validation("Missing 'latex_file' field".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("Missing 'job_description' field".to_string()))?;

    validate_document(&latex_content)?;
    validate_job_text(&job_description)?;
    let scored = edit_and_score(&state, &latex_content, &job_description, resume_text.as_deref())?;
    Ok(Json(scored))
}

/// POST /api/v1/analyze-and-edit
pub async fn handle_analyze_and_edit(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeAndEditRequest>,
) -> Result<Json<AnalyzeAndEditResponse>, AppError> {
    validate_resume_text(&req.resume_text)?;
    validate_job_text(&req.job_description)?;

    let analysis = state.analyzer.analyze(&req.resume_text, &req.job_description);

    let latex_editing = req
        .latex_content
        .as_deref()
        .filter(|doc| !doc.trim().is_empty())
        .map(|doc| {
            match edit_and_score(&state, doc, &req.job_description, Some(&req.resume_text)) {
                Ok(scored) => LatexEditing::Edited(scored),
                Err(AppError::EditFailed { message, .. }) => LatexEditing::Failed { error: message },
                Err(e) => LatexEditing::Failed {
                    error: e.to_string(),
                },
            }
        });

    Ok(Json(AnalyzeAndEditResponse {
        analysis,
        job_description: req.job_description,
        latex_editing,
    }))
}

/// Runs the editor and scores the plain text of both documents. A refused edit
/// becomes [`AppError::EditFailed`] carrying the original document.
fn edit_and_score(
    state: &AppState,
    document: &str,
    job_text: &str,
    resume_text: Option<&str>,
) -> Result<ScoredEdit, AppError> {
    let original_text = latex_to_plain_text(document);
    let resume_text = resume_text.unwrap_or(&original_text);

    let result = match state.editor.edit_document_for_job(document, job_text, resume_text) {
        EditOutcome::Edited(result) => result,
        EditOutcome::Failed(failure) => {
            return Err(AppError::EditFailed {
                message: failure.error,
                original_document: failure.original_document,
            })
        }
    };

    let original_score = score(&original_text, job_text).final_score;
    let new_score = score(&latex_to_plain_text(&result.edited_document), job_text).final_score;
    debug!(
        original_score,
        new_score,
        changes = result.changes_made.len(),
        "scored edited document"
    );

    Ok(ScoredEdit {
        result,
        original_score,
        new_score,
        score_improvement: new_score - original_score,
    })
}

fn validate_document(document: &str) -> Result<(), AppError> {
    if document.trim().is_empty() {
        return Err(AppError::Validation("LaTeX content is empty".to_string()));
    }
    Ok(())
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))
}

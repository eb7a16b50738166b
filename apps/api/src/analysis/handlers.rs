//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::extract::{extract_text, ResumeFormat};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::llm_client::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM};
use crate::render::{render, DisplayBlock};
use crate::state::AppState;

const MAX_FILE_SIZE_MB: usize = 10;
/// Hard cap on the uploaded resume; the router's body limit sits above this.
pub const MAX_UPLOAD_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Returned verbatim as the analysis text when the LLM call fails. The
/// renderer turns it into a plain paragraph, so the client still gets blocks.
const ANALYSIS_UNAVAILABLE: &str = "Error while analyzing the resume Please try again.";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub blocks: Vec<DisplayBlock>,
}

/// POST /analyze
///
/// Multipart form: `resume` (PDF or DOCX file) and `jobDescription` (text).
/// Extracts the resume text, asks the LLM for a match analysis, and returns
/// both the raw analysis string and its rendered display blocks.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                resume = Some((file_name, data));
            }
            Some("jobDescription") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (file_name, data) =
        resume.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "No job description provided".to_string(),
        ));
    }
    if file_name.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    let format = ResumeFormat::from_filename(&file_name).ok_or_else(|| {
        AppError::Validation("Invalid file type. Only PDF and DOCX are allowed.".to_string())
    })?;
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File size exceeds {MAX_FILE_SIZE_MB}MB."
        )));
    }

    let resume_text = extract_text(format, &data)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read resume: {e}")))?;
    if resume_text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Resume contains no extractable text".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        user = %user.id,
        file = %file_name,
        format = ?format,
        jd_chars = job_description.len(),
        "analysis requested"
    );

    let prompt = ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", &resume_text)
        .replace("{job_description}", &job_description);

    // Upstream failure degrades to a fixed apology rendered as prose; the
    // endpoint itself does not error.
    let analysis = match state.llm.generate(&prompt, ANALYSIS_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            warn!(%request_id, "analysis call failed: {e}");
            ANALYSIS_UNAVAILABLE.to_string()
        }
    };

    let blocks = render(&analysis);
    Ok(Json(AnalyzeResponse { analysis, blocks }))
}

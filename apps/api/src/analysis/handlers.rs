//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::analysis::pipeline::{analyze_resume, AnalyzeResponse};
use crate::errors::AppError;
use crate::loader::{self, DocumentKind, ResumeUpload};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Parsed `multipart/form-data` body shared by both endpoints.
struct UploadForm {
    upload: ResumeUpload,
    jd_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub file_name: String,
    pub kind: DocumentKind,
    pub segment_count: usize,
    pub preview: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/preview
///
/// Extracts text from the uploaded file and returns a capped preview without
/// calling the model. Shows exactly what `analyze` will read.
pub async fn handle_preview(mut multipart: Multipart) -> Result<Json<PreviewResponse>, AppError> {
    let form = read_upload_form(&mut multipart).await?;
    let kind = DocumentKind::from_file_name(&form.upload.file_name)?;
    let file_name = form.upload.file_name.clone();

    // Extraction is blocking file + parser work.
    let segments = tokio::task::spawn_blocking(move || loader::load_resume(&form.upload))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
        })??;

    Ok(Json(PreviewResponse {
        file_name,
        kind,
        segment_count: segments.len(),
        preview: loader::preview_text(&segments),
    }))
}

/// POST /api/v1/resumes/analyze
///
/// Full analysis pipeline: extract → prompt → model call → partition → panels.
/// The JD is optional; without one the response carries resume info only.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_upload_form(&mut multipart).await?;
    let response = analyze_resume(state.llm.as_ref(), form.upload, form.jd_text).await?;

    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the `file` part (required) and `jd_text` part (optional) out of the
/// multipart body. Unknown parts are skipped.
async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut upload: Option<ResumeUpload> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        // The name must be cloned out before the field body is consumed.
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::Validation("file part is missing a filename".to_string())
                })?;
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file part: {e}"))
                })?;
                upload = Some(ResumeUpload { file_name, bytes });
            }
            Some("jd_text") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read jd_text part: {e}"))
                })?;
                jd_text = Some(text);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation("multipart body must include a file part".to_string())
    })?;

    Ok(UploadForm { upload, jd_text })
}

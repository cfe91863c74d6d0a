//! Axum route handlers for the Grading API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::{
    grade_document, grade_text, Document, DocumentFormat, GradeError, RoleHint, ScoreReport,
};
use crate::state::AppState;

/// Multipart part carrying the document.
pub const FILE_FIELD: &str = "resume";
/// Optional multipart part carrying the role hint.
pub const ROLE_FIELD: &str = "role_type";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GradeTextRequest {
    pub text: String,
    #[serde(default)]
    pub role_type: Option<String>,
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /upload
///
/// Multipart form with a `resume` file and an optional `role_type`.
/// Extraction and scoring run on the blocking pool.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreReport>, AppError> {
    let request_id = Uuid::new_v4();
    let mut upload: Option<Upload> = None;
    let mut role_raw: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload = Some(Upload { filename, bytes });
            }
            Some(ROLE_FIELD) => {
                role_raw = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if upload.filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let format = DocumentFormat::from_filename(&upload.filename).inspect_err(|e| {
        warn!(%request_id, filename = %upload.filename, "rejected upload: {e}");
    })?;
    let role = RoleHint::parse(role_raw.as_deref());

    info!(
        %request_id,
        filename = %upload.filename,
        format = format.as_str(),
        role = role.as_str(),
        bytes = upload.bytes.len(),
        "Grading uploaded resume"
    );

    let doc = Document::new(upload.bytes, format);
    let scorer = state.scorer.clone();
    let report = run_blocking(request_id, move || {
        grade_document(&doc, role, scorer.as_ref())
    })
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/grade/text
///
/// Grades text the caller has already extracted.
pub async fn handle_grade_text(
    State(state): State<AppState>,
    Json(request): Json<GradeTextRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let request_id = Uuid::new_v4();
    let role = RoleHint::parse(request.role_type.as_deref());

    info!(
        %request_id,
        role = role.as_str(),
        chars = request.text.len(),
        "Grading submitted text"
    );

    let scorer = state.scorer.clone();
    let report = run_blocking(request_id, move || {
        grade_text(&request.text, role, scorer.as_ref())
    })
    .await?;

    Ok(Json(report))
}

async fn run_blocking<F>(request_id: Uuid, job: F) -> Result<ScoreReport, AppError>
where
    F: FnOnce() -> Result<ScoreReport, GradeError> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("grading task failed: {e}")))?;

    match outcome {
        Ok(report) => {
            info!(%request_id, total_score = report.total_score, "Resume graded");
            Ok(report)
        }
        Err(e) => {
            warn!(%request_id, "Grading rejected: {e}");
            Err(e.into())
        }
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart payload: {}", e.body_text()))
    }
}

//! `POST /api/analyze` — exam upload and two-pass analysis.
//!
//! Accepts a multipart form with a `file` field (exam image) and/or a
//! `text` field (pasted report text). The response is the merged
//! `AnalysisReport`; failures use the flat `{ "error": string }` body with
//! status 400 (bad upload) or 500 (analysis failed).

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AnalysisReport, ExamImage, ExamInput, MAX_IMAGE_BYTES};
use crate::pipeline::orchestrator::analyze_exam;
use crate::pipeline::sanitize::sanitize_exam_text;

/// Multipart field carrying the exam image.
const FILE_FIELD: &str = "file";
/// Multipart field carrying pasted exam text.
const TEXT_FIELD: &str = "text";

pub async fn analyze(
    State(ctx): State<ApiContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut image: Option<ExamImage> = None;
    let mut text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let declared_mime = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_multipart)?;

                if bytes.len() > MAX_IMAGE_BYTES {
                    return Err(ApiError::BadRequest(format!(
                        "Arquivo excede o limite de {} MB",
                        MAX_IMAGE_BYTES / (1024 * 1024)
                    )));
                }
                if !bytes.is_empty() {
                    image = Some(ExamImage::new(
                        bytes.to_vec(),
                        declared_mime.as_deref(),
                        file_name.as_deref(),
                    ));
                }
            }
            Some(TEXT_FIELD) => {
                let raw = field.text().await.map_err(bad_multipart)?;
                text = Some(sanitize_exam_text(&raw));
            }
            _ => {
                // Unknown fields are ignored, not rejected.
            }
        }
    }

    let input = ExamInput::new(image, text)
        .map_err(|_| ApiError::BadRequest("Nenhum arquivo enviado".into()))?;

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        has_image = input.image().is_some(),
        has_text = input.text().is_some(),
        image_bytes = input.image().map(ExamImage::len).unwrap_or(0),
        "Exam analysis requested"
    );

    let report = analyze_exam(ctx.chat.as_ref(), &input).await?;

    tracing::info!(%request_id, "Exam analysis request served");
    Ok(Json(report))
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart body: {err}"))
}

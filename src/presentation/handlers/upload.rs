use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::{PipelineError, UploadRequest};
use crate::domain::ExtractionResult;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub tender_id: String,
    pub status: String,
    pub item_count: usize,
    pub extraction: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
}

/// Accepts a multipart upload: a `file` part plus optional `requires_review`
/// and `instruction` text parts. Processes the document synchronously to
/// completion within this request.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_tender_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut requires_review = true;
    let mut instruction: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return error_response(&PipelineError::ValidationError(format!(
                    "failed to read multipart body: {}",
                    e
                )))
                .into_response();
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let media_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file bytes");
                        return error_response(&PipelineError::ValidationError(format!(
                            "failed to read file: {}",
                            e
                        )))
                        .into_response();
                    }
                };
                tracing::debug!(filename = %filename, media_type = %media_type, bytes = data.len(), "File part received");
                file = Some((filename, media_type, data));
            }
            "requires_review" => {
                let text = field.text().await.unwrap_or_default();
                requires_review = matches!(
                    text.trim().to_lowercase().as_str(),
                    "true" | "1" | "yes"
                );
            }
            "instruction" => {
                let text = field.text().await.unwrap_or_default();
                if !text.trim().is_empty() {
                    instruction = Some(text);
                }
            }
            _ => {}
        }
    }

    let Some((filename, media_type, data)) = file else {
        return error_response(&PipelineError::ValidationError(
            "no file uploaded; expected a multipart 'file' part".to_string(),
        ))
        .into_response();
    };

    let request = UploadRequest {
        size_bytes: data.len() as u64,
        data,
        filename,
        media_type,
        instruction,
        requires_review,
    };

    match state.document_service.process_upload(request).await {
        Ok(processed) => (
            StatusCode::CREATED,
            Json(UploadResponse {
                tender_id: processed.tender_id.as_uuid().to_string(),
                status: processed.status.as_str().to_string(),
                item_count: processed.item_count,
                extraction: processed.extraction,
                extracted_text: processed.extracted_text,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, reason = e.reason_code(), "Upload processing failed");
            error_response(&e).into_response()
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::application::services::PipelineError;
use crate::application::services::extraction::ExtractionFailureKind;

/// The one error shape callers see: message, machine reason code, and an
/// actionable suggestion, so the UI can render differentiated guidance
/// without parsing free text.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub reason: &'static str,
    pub suggestion: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

pub fn error_response(err: &PipelineError) -> (StatusCode, Json<ErrorBody>) {
    let status = match err {
        PipelineError::UnsupportedFileType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        PipelineError::EmptyFile(_)
        | PipelineError::CorruptFile(_)
        | PipelineError::PasswordProtectedFile(_)
        | PipelineError::ParsingError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::ValidationError(_) => StatusCode::BAD_REQUEST,
        PipelineError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::AiExtractionFailed(failure) => {
            if failure.kind == ExtractionFailureKind::RateLimited {
                StatusCode::TOO_MANY_REQUESTS
            } else {
                StatusCode::BAD_GATEWAY
            }
        }
        PipelineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
            reason: err.reason_code(),
            suggestion: err.suggestion(),
            details: err.details(),
        }),
    )
}

use serde_json::json;

use crate::application::ports::{LoaderError, RepositoryError};
use crate::domain::FileFormat;

use super::extraction::ExtractionFailure;

/// Every failure the pipeline can surface to a caller. Each variant carries
/// a human-readable message and exposes a machine reason code plus an
/// actionable suggestion, so callers can render differentiated guidance
/// without parsing free text.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("unsupported file type: {given}")]
    UnsupportedFileType { given: String },
    #[error("file contains no usable content: {0}")]
    EmptyFile(String),
    #[error("file appears to be corrupted: {0}")]
    CorruptFile(String),
    #[error("file is password protected: {0}")]
    PasswordProtectedFile(String),
    #[error("failed to parse file: {0}")]
    ParsingError(String),
    #[error("AI extraction failed: {0}")]
    AiExtractionFailed(ExtractionFailure),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl PipelineError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            PipelineError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            PipelineError::EmptyFile(_) => "EMPTY_FILE",
            PipelineError::CorruptFile(_) => "CORRUPT_FILE",
            PipelineError::PasswordProtectedFile(_) => "PASSWORD_PROTECTED_FILE",
            PipelineError::ParsingError(_) => "PARSING_ERROR",
            PipelineError::AiExtractionFailed(failure) => failure.reason_code(),
            PipelineError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            PipelineError::ValidationError(_) => "VALIDATION_ERROR",
            PipelineError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            PipelineError::UnsupportedFileType { .. } => {
                "Upload a PDF, spreadsheet (xlsx/xls/ods), or delimited-text (csv/tsv) file."
            }
            PipelineError::EmptyFile(_) => {
                "The file has no extractable content. Check that it contains data rows or text."
            }
            PipelineError::CorruptFile(_) => {
                "The file could not be decoded. Re-export it from the source application."
            }
            PipelineError::PasswordProtectedFile(_) => {
                "Remove the password protection and upload the file again."
            }
            PipelineError::ParsingError(_) => {
                "The file could not be parsed. Check that it is a valid document of its type."
            }
            PipelineError::AiExtractionFailed(failure) => failure.suggestion(),
            PipelineError::ResourceNotFound(_) => {
                "Check the tender identifier; the record may have been deleted."
            }
            PipelineError::ValidationError(_) => {
                "Fix the highlighted input problem and resubmit."
            }
            PipelineError::Storage(_) => "A storage operation failed. Retry; if it persists, check the backing store.",
        }
    }

    /// Structured context for callers, where a variant has any.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            PipelineError::UnsupportedFileType { given } => Some(json!({
                "given": given,
                "accepted": FileFormat::accepted_mime_types(),
            })),
            _ => None,
        }
    }
}

impl From<LoaderError> for PipelineError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::EmptyFile(msg) => PipelineError::EmptyFile(msg),
            LoaderError::CorruptFile(msg) => PipelineError::CorruptFile(msg),
            LoaderError::PasswordProtected(msg) => PipelineError::PasswordProtectedFile(msg),
            LoaderError::Parsing(msg) => PipelineError::ParsingError(msg),
        }
    }
}

impl From<ExtractionFailure> for PipelineError {
    fn from(failure: ExtractionFailure) -> Self {
        PipelineError::AiExtractionFailed(failure)
    }
}

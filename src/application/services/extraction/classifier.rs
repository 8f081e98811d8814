use std::fmt;

use crate::application::ports::LlmClientError;

/// A model-call failure after classification. The classification is a
/// best-effort hint derived from an opaque upstream message, not a
/// guaranteed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub kind: ExtractionFailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionFailureKind {
    Authentication,
    RateLimited,
    Network,
    SchemaValidation,
    Other,
}

impl ExtractionFailure {
    pub fn schema(message: String) -> Self {
        Self {
            kind: ExtractionFailureKind::SchemaValidation,
            message,
        }
    }

    pub fn reason_code(&self) -> &'static str {
        match self.kind {
            ExtractionFailureKind::Authentication => "AI_AUTH_FAILED",
            ExtractionFailureKind::RateLimited => "AI_RATE_LIMITED",
            ExtractionFailureKind::Network => "AI_NETWORK_ERROR",
            ExtractionFailureKind::SchemaValidation => "AI_SCHEMA_MISMATCH",
            ExtractionFailureKind::Other => "AI_EXTRACTION_FAILED",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self.kind {
            ExtractionFailureKind::Authentication => {
                "Check that the AI service API key is configured and valid."
            }
            ExtractionFailureKind::RateLimited => {
                "The AI service is rate limiting requests. Wait a moment and retry."
            }
            ExtractionFailureKind::Network => {
                "Could not reach the AI service. Check connectivity and retry."
            }
            ExtractionFailureKind::SchemaValidation => {
                "The AI reply did not match the expected structure. Retry, or simplify the document."
            }
            ExtractionFailureKind::Other => {
                "Extraction failed for an unrecognized reason. Retry, and check the service logs."
            }
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ExtractionFailureKind::Authentication => "authentication failure",
            ExtractionFailureKind::RateLimited => "rate limit exceeded",
            ExtractionFailureKind::Network => "network failure",
            ExtractionFailureKind::SchemaValidation => "schema validation failure",
            ExtractionFailureKind::Other => "extraction failure",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

// Checked in order; the first group with a hit wins. Messages that match
// nothing fall through to Other.
const PATTERN_TABLE: &[(ExtractionFailureKind, &[&str])] = &[
    (
        ExtractionFailureKind::Authentication,
        &["api key", "unauthorized", "authentication", "401", "403", "forbidden"],
    ),
    (
        ExtractionFailureKind::RateLimited,
        &["rate limit", "quota", "429", "too many requests", "overloaded"],
    ),
    (
        ExtractionFailureKind::Network,
        &["timeout", "timed out", "connection", "network", "dns", "unreachable"],
    ),
    (
        ExtractionFailureKind::SchemaValidation,
        &["schema", "json", "parse", "deserialize"],
    ),
];

/// Maps an upstream model-call error to a classified failure via
/// case-insensitive substring checks over its message.
pub fn classify_model_error(err: &LlmClientError) -> ExtractionFailure {
    match err {
        LlmClientError::RateLimited => ExtractionFailure {
            kind: ExtractionFailureKind::RateLimited,
            message: err.to_string(),
        },
        LlmClientError::InvalidResponse(msg) => ExtractionFailure {
            kind: ExtractionFailureKind::SchemaValidation,
            message: msg.clone(),
        },
        LlmClientError::ApiRequestFailed(msg) => {
            let lowered = msg.to_lowercase();
            let kind = PATTERN_TABLE
                .iter()
                .find(|(_, patterns)| patterns.iter().any(|p| lowered.contains(p)))
                .map(|(kind, _)| *kind)
                .unwrap_or(ExtractionFailureKind::Other);
            ExtractionFailure {
                kind,
                message: msg.clone(),
            }
        }
    }
}

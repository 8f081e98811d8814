use async_trait::async_trait;

/// A language-model endpoint that accepts a prompt plus a JSON schema and
/// returns a schema-constrained JSON structure. No latency or availability
/// guarantees; the error message is all callers get for classification.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

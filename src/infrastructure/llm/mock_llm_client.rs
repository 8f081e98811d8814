use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError};

/// Scripted model client for tests and offline development.
pub struct MockLlmClient {
    behavior: MockLlmBehavior,
}

pub enum MockLlmBehavior {
    Respond(Value),
    FailApi(String),
    RateLimit,
    InvalidResponse(String),
}

impl MockLlmClient {
    pub fn responding(value: Value) -> Self {
        Self {
            behavior: MockLlmBehavior::Respond(value),
        }
    }

    pub fn failing_api(message: impl Into<String>) -> Self {
        Self {
            behavior: MockLlmBehavior::FailApi(message.into()),
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            behavior: MockLlmBehavior::RateLimit,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            behavior: MockLlmBehavior::InvalidResponse(message.into()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_structured(
        &self,
        _prompt: &str,
        _schema_name: &str,
        _schema: &Value,
    ) -> Result<Value, LlmClientError> {
        match &self.behavior {
            MockLlmBehavior::Respond(value) => Ok(value.clone()),
            MockLlmBehavior::FailApi(message) => {
                Err(LlmClientError::ApiRequestFailed(message.clone()))
            }
            MockLlmBehavior::RateLimit => Err(LlmClientError::RateLimited),
            MockLlmBehavior::InvalidResponse(message) => {
                Err(LlmClientError::InvalidResponse(message.clone()))
            }
        }
    }
}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError};

/// OpenAI-compatible chat-completions client constrained to structured
/// output. Built once at startup and shared; holds no per-request state.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, model: String, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, prompt, schema), fields(model = %self.model, schema = %schema_name))]
    async fn complete_structured(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: &Value,
    ) -> Result<Value, LlmClientError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema_name,
                    strict: true,
                    schema,
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                LlmClientError::InvalidResponse("no content in model reply".to_string())
            })?;

        serde_json::from_str(&content).map_err(|e| {
            LlmClientError::InvalidResponse(format!("reply is not valid JSON: {}", e))
        })
    }
}

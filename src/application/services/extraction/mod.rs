mod classifier;
mod prompt;
mod schema;

pub use classifier::{ExtractionFailure, ExtractionFailureKind, classify_model_error};
pub use prompt::build_extraction_prompt;
pub use schema::{EXTRACTION_SCHEMA, EXTRACTION_SCHEMA_NAME, parse_extraction};

use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::LlmClient;
use crate::domain::ExtractionResult;

/// Formats the extraction prompt, invokes the model with the BOQ schema,
/// validates the reply, and classifies any failure.
///
/// Stateless: constructed once at startup around a shared model client and
/// reused across requests.
pub struct BoqExtractionService {
    llm: Arc<dyn LlmClient>,
}

impl BoqExtractionService {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    #[tracing::instrument(skip(self, document_text, instruction), fields(text_len = document_text.len()))]
    pub async fn extract(
        &self,
        document_text: &str,
        instruction: Option<&str>,
    ) -> Result<ExtractionResult, ExtractionFailure> {
        let prompt =
            build_extraction_prompt(document_text, instruction, Utc::now().date_naive());

        let value = self
            .llm
            .complete_structured(&prompt, EXTRACTION_SCHEMA_NAME, &EXTRACTION_SCHEMA)
            .await
            .map_err(|e| {
                let failure = classify_model_error(&e);
                tracing::warn!(
                    kind = ?failure.kind,
                    error = %failure.message,
                    "Model call failed"
                );
                failure
            })?;

        let result = parse_extraction(value).map_err(ExtractionFailure::schema)?;

        tracing::info!(
            item_count = result.items.len(),
            currency = %result.currency,
            "Extraction complete"
        );

        Ok(result)
    }
}

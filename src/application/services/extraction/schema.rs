use std::sync::LazyLock;

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{BoqItemDraft, DEFAULT_CURRENCY, ExtractionResult};

pub const EXTRACTION_SCHEMA_NAME: &str = "boq_extraction";

/// The one declarative description of the extraction output. It is sent to
/// the model as the response format and it drives validation of the reply;
/// there is no second copy to drift from.
pub static EXTRACTION_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "projectName": {
                "type": ["string", "null"],
                "description": "Project name if stated in the document"
            },
            "projectLocation": {
                "type": ["string", "null"],
                "description": "Project location if stated in the document"
            },
            "items": {
                "type": "array",
                "description": "Every bill-of-quantities line item, in document order",
                "items": {
                    "type": "object",
                    "properties": {
                        "itemNumber": {
                            "type": "string",
                            "description": "Item reference as printed, e.g. '1.02' or 'A-3'"
                        },
                        "description": {
                            "type": "string",
                            "description": "Work item description"
                        },
                        "quantity": {
                            "type": "number",
                            "description": "Quantity as a positive number"
                        },
                        "unit": {
                            "type": "string",
                            "description": "Unit of measure, e.g. 'm2', 'nr', 'kg'"
                        },
                        "unitRate": {
                            "type": ["number", "null"],
                            "description": "Rate per unit if stated"
                        },
                        "amount": {
                            "type": ["number", "null"],
                            "description": "Line amount if stated"
                        },
                        "category": {
                            "type": ["string", "null"],
                            "description": "Trade or section label, e.g. 'Earthworks'"
                        }
                    },
                    "required": ["itemNumber", "description", "quantity", "unit"],
                    "additionalProperties": false
                }
            },
            "totalEstimatedCost": {
                "type": ["number", "null"],
                "description": "Overall estimated cost if stated"
            },
            "currency": {
                "type": ["string", "null"],
                "description": "ISO currency code, e.g. 'USD'"
            },
            "notes": {
                "type": ["string", "null"],
                "description": "Anything ambiguous or assumed during extraction"
            }
        },
        "required": ["items"],
        "additionalProperties": false
    })
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ExtractionPayload {
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    project_location: Option<String>,
    items: Vec<BoqItemDraft>,
    #[serde(default)]
    total_estimated_cost: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Validates a model reply against the extraction schema and converts it
/// into the domain contract. Rejects structurally valid JSON that breaks
/// the semantic constraints (non-positive quantity, negative rate/amount).
pub fn parse_extraction(value: Value) -> Result<ExtractionResult, String> {
    let payload: ExtractionPayload = serde_json::from_value(value)
        .map_err(|e| format!("response does not match extraction schema: {}", e))?;

    for item in &payload.items {
        item.validate()?;
    }

    if let Some(total) = payload.total_estimated_cost {
        if !total.is_finite() || total < 0.0 {
            return Err(format!(
                "totalEstimatedCost must be non-negative, got {}",
                total
            ));
        }
    }

    let currency = payload
        .currency
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    Ok(ExtractionResult {
        project_name: payload.project_name,
        project_location: payload.project_location,
        items: payload.items,
        total_estimated_cost: payload.total_estimated_cost,
        currency,
        extracted_at: Utc::now(),
        notes: payload.notes,
    })
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::BoqItemDraft;

/// The structure the extraction model produces for one document.
///
/// Transient contract between the extraction service and the document
/// service; never persisted as its own record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_location: Option<String>,
    pub items: Vec<BoqItemDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_estimated_cost: Option<f64>,
    pub currency: String,
    pub extracted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub const DEFAULT_CURRENCY: &str = "USD";

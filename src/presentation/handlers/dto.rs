use serde::Serialize;

use crate::domain::{BoqItem, ReviewLogEntry, Tender};

/// Wire shape of one tender record. Raw extracted text is only included
/// where the caller needs it for review display.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: String,
    pub filename: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqItemResponse {
    pub id: String,
    pub item_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLogResponse {
    pub id: String,
    pub action: String,
    pub detail: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    pub created_at: String,
}

impl TenderResponse {
    pub fn from_tender(tender: &Tender) -> Self {
        Self {
            id: tender.id.as_uuid().to_string(),
            filename: tender.filename.clone(),
            media_type: tender.media_type.clone(),
            size_bytes: tender.size_bytes,
            status: tender.status.as_str().to_string(),
            instruction: tender.instruction.clone(),
            created_at: tender.created_at.to_rfc3339(),
            updated_at: tender.updated_at.to_rfc3339(),
        }
    }
}

impl BoqItemResponse {
    pub fn from_item(item: &BoqItem) -> Self {
        Self {
            id: item.id.as_uuid().to_string(),
            item_number: item.item_number.clone(),
            description: item.description.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            unit_rate: item.unit_rate,
            amount: item.amount,
            category: item.category.clone(),
        }
    }
}

impl ReviewLogResponse {
    pub fn from_entry(entry: &ReviewLogEntry) -> Self {
        Self {
            id: entry.id.as_uuid().to_string(),
            action: entry.action.as_str().to_string(),
            detail: entry.detail.clone(),
            actor_ip: entry.actor_ip.clone(),
            actor_id: entry.actor_id.clone(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

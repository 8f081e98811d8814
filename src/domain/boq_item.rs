use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TenderId;

/// One line of a Bill of Quantities, owned by exactly one tender.
///
/// Items are replaced wholesale (delete-all, insert-all) on edit rather
/// than patched field-by-field, so item identity does not survive edits.
#[derive(Debug, Clone, PartialEq)]
pub struct BoqItem {
    pub id: BoqItemId,
    pub tender_id: TenderId,
    pub item_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_rate: Option<f64>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoqItemId(Uuid);

impl BoqItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BoqItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// An incoming BOQ line before it is bound to a tender: the shape the
/// extraction model proposes and the shape callers submit on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqItemDraft {
    pub item_number: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BoqItemDraft {
    /// Quantity must be a positive real; rate and amount, when present,
    /// non-negative reals. Amount is conventionally quantity x rate but
    /// that is not enforced.
    pub fn validate(&self) -> Result<(), String> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(format!(
                "item {}: quantity must be a positive number, got {}",
                self.item_number, self.quantity
            ));
        }
        if let Some(rate) = self.unit_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(format!(
                    "item {}: unit rate must be non-negative, got {}",
                    self.item_number, rate
                ));
            }
        }
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!(
                    "item {}: amount must be non-negative, got {}",
                    self.item_number, amount
                ));
            }
        }
        Ok(())
    }
}

impl BoqItem {
    pub fn from_draft(tender_id: TenderId, draft: &BoqItemDraft) -> Self {
        Self {
            id: BoqItemId::new(),
            tender_id,
            item_number: draft.item_number.clone(),
            description: draft.description.clone(),
            quantity: draft.quantity,
            unit: draft.unit.clone(),
            unit_rate: draft.unit_rate,
            amount: draft.amount,
            category: draft.category.clone(),
        }
    }
}

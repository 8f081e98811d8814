use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenderId;

/// Append-only audit record for a review-workflow transition.
/// Immutable once created; removed only when the owning tender is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLogEntry {
    pub id: ReviewLogId,
    pub tender_id: TenderId,
    pub action: ReviewAction,
    pub detail: serde_json::Value,
    pub actor_ip: Option<String>,
    pub actor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewLogId(Uuid);

impl ReviewLogId {
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

impl Default for ReviewLogId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewAction {
    Approved,
    Rejected,
    Edited,
    ItemsUpdated,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approved => "approved",
            ReviewAction::Rejected => "rejected",
            ReviewAction::Edited => "edited",
            ReviewAction::ItemsUpdated => "items_updated",
        }
    }
}

impl FromStr for ReviewAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewAction::Approved),
            "rejected" => Ok(ReviewAction::Rejected),
            "edited" => Ok(ReviewAction::Edited),
            "items_updated" => Ok(ReviewAction::ItemsUpdated),
            _ => Err(format!("Invalid review action: {}", s)),
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ReviewLogEntry {
    pub fn new(
        tender_id: TenderId,
        action: ReviewAction,
        detail: serde_json::Value,
        actor_ip: Option<String>,
        actor_id: Option<String>,
    ) -> Self {
        Self {
            id: ReviewLogId::new(),
            tender_id,
            action,
            detail,
            actor_ip,
            actor_id,
            created_at: Utc::now(),
        }
    }
}

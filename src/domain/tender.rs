use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::TenderStatus;

/// One uploaded tender document and its end-to-end processing record.
#[derive(Debug, Clone, PartialEq)]
pub struct Tender {
    pub id: TenderId,
    pub filename: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub extracted_text: String,
    pub instruction: Option<String>,
    pub status: TenderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenderId(Uuid);

impl TenderId {
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

impl Default for TenderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Tender {
    pub fn new(
        filename: String,
        media_type: String,
        size_bytes: u64,
        extracted_text: String,
        instruction: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TenderId::new(),
            filename,
            media_type,
            size_bytes,
            extracted_text,
            instruction,
            status: TenderStatus::Processing,
            created_at: now,
            updated_at: now,
        }
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{RepositoryError, TenderRepository};
use crate::domain::{BoqItem, ReviewLogEntry, Tender, TenderId, TenderStatus};

/// Record store backed by in-process maps. Default wiring when no database
/// is configured, and the store the tests run against.
#[derive(Default)]
pub struct InMemoryTenderRepository {
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    tenders: HashMap<Uuid, Tender>,
    items: HashMap<Uuid, Vec<BoqItem>>,
    logs: HashMap<Uuid, Vec<ReviewLogEntry>>,
}

impl InMemoryTenderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenderRepository for InMemoryTenderRepository {
    async fn create(&self, tender: &Tender) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let key = tender.id.as_uuid();
        if state.tenders.contains_key(&key) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "tender {} already exists",
                key
            )));
        }
        state.tenders.insert(key, tender.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.tenders.get(&id.as_uuid()).cloned())
    }

    async fn update_status(
        &self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let tender = state
            .tenders
            .get_mut(&id.as_uuid())
            .ok_or_else(|| RepositoryError::NotFound(id.as_uuid().to_string()))?;
        tender.status = status;
        tender.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: TenderId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let key = id.as_uuid();
        state
            .tenders
            .remove(&key)
            .ok_or_else(|| RepositoryError::NotFound(key.to_string()))?;
        state.items.remove(&key);
        state.logs.remove(&key);
        Ok(())
    }

    async fn list_recent(&self, skip: u32, take: u32) -> Result<Vec<Tender>, RepositoryError> {
        let state = self.state.read().await;
        let mut tenders: Vec<Tender> = state.tenders.values().cloned().collect();
        tenders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tenders
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    async fn replace_items(
        &self,
        tender_id: TenderId,
        items: &[BoqItem],
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let key = tender_id.as_uuid();
        if !state.tenders.contains_key(&key) {
            return Err(RepositoryError::NotFound(key.to_string()));
        }
        state.items.insert(key, items.to_vec());
        Ok(())
    }

    async fn items_for(&self, tender_id: TenderId) -> Result<Vec<BoqItem>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .get(&tender_id.as_uuid())
            .cloned()
            .unwrap_or_default())
    }

    async fn append_log(&self, entry: &ReviewLogEntry) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let key = entry.tender_id.as_uuid();
        if !state.tenders.contains_key(&key) {
            return Err(RepositoryError::NotFound(key.to_string()));
        }
        state.logs.entry(key).or_default().push(entry.clone());
        Ok(())
    }

    async fn logs_for(
        &self,
        tender_id: TenderId,
    ) -> Result<Vec<ReviewLogEntry>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .get(&tender_id.as_uuid())
            .cloned()
            .unwrap_or_default())
    }
}

use async_trait::async_trait;

use crate::domain::{BoqItem, ReviewLogEntry, Tender, TenderId, TenderStatus};

use super::RepositoryError;

/// Record store for tenders, their BOQ items, and the review audit trail.
///
/// BOQ items are only ever replaced as a whole set; review log entries are
/// append-only. Both collections are deleted with their owning tender.
#[async_trait]
pub trait TenderRepository: Send + Sync {
    async fn create(&self, tender: &Tender) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, RepositoryError>;

    async fn update_status(
        &self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<(), RepositoryError>;

    async fn delete(&self, id: TenderId) -> Result<(), RepositoryError>;

    /// Most recently created first.
    async fn list_recent(&self, skip: u32, take: u32) -> Result<Vec<Tender>, RepositoryError>;

    /// Delete-all, insert-all as one unit.
    async fn replace_items(
        &self,
        tender_id: TenderId,
        items: &[BoqItem],
    ) -> Result<(), RepositoryError>;

    async fn items_for(&self, tender_id: TenderId) -> Result<Vec<BoqItem>, RepositoryError>;

    async fn append_log(&self, entry: &ReviewLogEntry) -> Result<(), RepositoryError>;

    async fn logs_for(&self, tender_id: TenderId)
    -> Result<Vec<ReviewLogEntry>, RepositoryError>;
}

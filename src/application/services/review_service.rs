use std::sync::Arc;

use serde_json::json;

use crate::application::ports::TenderRepository;
use crate::domain::{
    BoqItem, BoqItemDraft, ReviewAction, ReviewLogEntry, Tender, TenderId, TenderStatus,
};

use super::pipeline_error::PipelineError;

/// Who triggered a review transition, as far as the transport layer knows.
#[derive(Debug, Clone, Default)]
pub struct ActorContext {
    pub ip: Option<String>,
    pub actor_id: Option<String>,
}

/// The review state machine. Every transition validates tender existence
/// and current state before mutating anything, so a refused transition
/// leaves zero partial writes, and every successful transition appends
/// exactly one audit entry per action tag.
pub struct ReviewService {
    repository: Arc<dyn TenderRepository>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }

    /// Approve a pending-review tender, optionally replacing its item set
    /// wholesale first. A supplied replacement also appends an `edited`
    /// audit entry before the `approved` one.
    #[tracing::instrument(skip(self, replacement_items, actor), fields(tender_id = %id.as_uuid()))]
    pub async fn approve(
        &self,
        id: TenderId,
        replacement_items: Option<Vec<BoqItemDraft>>,
        actor: ActorContext,
    ) -> Result<Tender, PipelineError> {
        let tender = self.require_reviewable(id, "approve").await?;

        if let Some(drafts) = replacement_items {
            let items = validated_items(id, &drafts)?;
            self.repository.replace_items(id, &items).await?;
            self.append_log(
                id,
                ReviewAction::Edited,
                json!({ "itemCount": items.len() }),
                &actor,
            )
            .await?;
        }

        self.repository
            .update_status(id, TenderStatus::Completed)
            .await?;
        self.append_log(
            id,
            ReviewAction::Approved,
            json!({ "previousStatus": tender.status.as_str() }),
            &actor,
        )
        .await?;

        tracing::info!(tender_id = %id.as_uuid(), "Tender approved");
        self.refreshed(id).await
    }

    /// Reject a pending-review tender. The audit entry records the prior
    /// status and the reason, or an explicit no-reason marker.
    #[tracing::instrument(skip(self, reason, actor), fields(tender_id = %id.as_uuid()))]
    pub async fn reject(
        &self,
        id: TenderId,
        reason: Option<String>,
        actor: ActorContext,
    ) -> Result<Tender, PipelineError> {
        let tender = self.require_reviewable(id, "reject").await?;

        self.repository
            .update_status(id, TenderStatus::Rejected)
            .await?;
        self.append_log(
            id,
            ReviewAction::Rejected,
            json!({
                "previousStatus": tender.status.as_str(),
                "reason": reason.as_deref().unwrap_or("no reason provided"),
            }),
            &actor,
        )
        .await?;

        tracing::info!(tender_id = %id.as_uuid(), "Tender rejected");
        self.refreshed(id).await
    }

    /// Replace the item set of a tender that is still pending review,
    /// without changing its status. Replacement is delete-all/insert-all;
    /// repeating the same call is idempotent for the item set but appends
    /// a fresh audit entry each time.
    #[tracing::instrument(skip(self, drafts, actor), fields(tender_id = %id.as_uuid()))]
    pub async fn update_items(
        &self,
        id: TenderId,
        drafts: Vec<BoqItemDraft>,
        actor: ActorContext,
    ) -> Result<Tender, PipelineError> {
        let _tender = self.require_reviewable(id, "update items on").await?;

        let items = validated_items(id, &drafts)?;
        let old_count = self.repository.items_for(id).await?.len();

        self.repository.replace_items(id, &items).await?;
        self.append_log(
            id,
            ReviewAction::ItemsUpdated,
            json!({ "oldItemCount": old_count, "newItemCount": items.len() }),
            &actor,
        )
        .await?;

        tracing::info!(
            tender_id = %id.as_uuid(),
            old_count,
            new_count = items.len(),
            "Tender items replaced"
        );
        self.refreshed(id).await
    }

    async fn require_reviewable(
        &self,
        id: TenderId,
        verb: &str,
    ) -> Result<Tender, PipelineError> {
        let tender = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PipelineError::ResourceNotFound(id.as_uuid().to_string()))?;

        if tender.status != TenderStatus::PendingReview {
            return Err(PipelineError::ValidationError(format!(
                "cannot {} a tender in status '{}'",
                verb, tender.status
            )));
        }

        Ok(tender)
    }

    async fn refreshed(&self, id: TenderId) -> Result<Tender, PipelineError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PipelineError::ResourceNotFound(id.as_uuid().to_string()))
    }

    async fn append_log(
        &self,
        id: TenderId,
        action: ReviewAction,
        detail: serde_json::Value,
        actor: &ActorContext,
    ) -> Result<(), PipelineError> {
        let entry = ReviewLogEntry::new(
            id,
            action,
            detail,
            actor.ip.clone(),
            actor.actor_id.clone(),
        );
        self.repository.append_log(&entry).await?;
        Ok(())
    }
}

fn validated_items(
    tender_id: TenderId,
    drafts: &[BoqItemDraft],
) -> Result<Vec<BoqItem>, PipelineError> {
    for draft in drafts {
        draft.validate().map_err(PipelineError::ValidationError)?;
    }
    Ok(drafts
        .iter()
        .map(|draft| BoqItem::from_draft(tender_id, draft))
        .collect())
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{RepositoryError, TenderRepository};
use crate::domain::{
    BoqItem, BoqItemId, ReviewAction, ReviewLogEntry, ReviewLogId, Tender, TenderId, TenderStatus,
};

/// PostgreSQL-backed record store. Schema lives in `migrations/`.
pub struct PgTenderRepository {
    pool: PgPool,
}

impl PgTenderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_failed(e: sqlx::Error) -> RepositoryError {
    RepositoryError::QueryFailed(e.to_string())
}

fn tender_from_row(row: &PgRow) -> Result<Tender, RepositoryError> {
    let status: String = row.try_get("status").map_err(query_failed)?;
    let status = status.parse::<TenderStatus>().map_err(RepositoryError::QueryFailed)?;
    let size_bytes: i64 = row.try_get("size_bytes").map_err(query_failed)?;

    Ok(Tender {
        id: TenderId::from_uuid(row.try_get("id").map_err(query_failed)?),
        filename: row.try_get("filename").map_err(query_failed)?,
        media_type: row.try_get("media_type").map_err(query_failed)?,
        size_bytes: size_bytes as u64,
        extracted_text: row.try_get("extracted_text").map_err(query_failed)?,
        instruction: row.try_get("instruction").map_err(query_failed)?,
        status,
        created_at: row.try_get("created_at").map_err(query_failed)?,
        updated_at: row.try_get("updated_at").map_err(query_failed)?,
    })
}

fn item_from_row(row: &PgRow) -> Result<BoqItem, RepositoryError> {
    Ok(BoqItem {
        id: BoqItemId::from_uuid(row.try_get("id").map_err(query_failed)?),
        tender_id: TenderId::from_uuid(row.try_get("tender_id").map_err(query_failed)?),
        item_number: row.try_get("item_number").map_err(query_failed)?,
        description: row.try_get("description").map_err(query_failed)?,
        quantity: row.try_get("quantity").map_err(query_failed)?,
        unit: row.try_get("unit").map_err(query_failed)?,
        unit_rate: row.try_get("unit_rate").map_err(query_failed)?,
        amount: row.try_get("amount").map_err(query_failed)?,
        category: row.try_get("category").map_err(query_failed)?,
    })
}

fn log_from_row(row: &PgRow) -> Result<ReviewLogEntry, RepositoryError> {
    let action: String = row.try_get("action").map_err(query_failed)?;
    let action = action.parse::<ReviewAction>().map_err(RepositoryError::QueryFailed)?;

    Ok(ReviewLogEntry {
        id: ReviewLogId::from_uuid(row.try_get("id").map_err(query_failed)?),
        tender_id: TenderId::from_uuid(row.try_get("tender_id").map_err(query_failed)?),
        action,
        detail: row.try_get("detail").map_err(query_failed)?,
        actor_ip: row.try_get("actor_ip").map_err(query_failed)?,
        actor_id: row.try_get("actor_id").map_err(query_failed)?,
        created_at: row.try_get("created_at").map_err(query_failed)?,
    })
}

#[async_trait]
impl TenderRepository for PgTenderRepository {
    #[instrument(skip(self, tender), fields(tender_id = %tender.id.as_uuid()))]
    async fn create(&self, tender: &Tender) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO tenders
                (id, filename, media_type, size_bytes, extracted_text, instruction,
                 status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(tender.id.as_uuid())
        .bind(&tender.filename)
        .bind(&tender.media_type)
        .bind(tender.size_bytes as i64)
        .bind(&tender.extracted_text)
        .bind(&tender.instruction)
        .bind(tender.status.as_str())
        .bind(tender.created_at)
        .bind(tender.updated_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self), fields(tender_id = %id.as_uuid()))]
    async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, filename, media_type, size_bytes, extracted_text, instruction,
                   status, created_at, updated_at
            FROM tenders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.as_ref().map(tender_from_row).transpose()
    }

    #[instrument(skip(self), fields(tender_id = %id.as_uuid(), status = %status))]
    async fn update_status(
        &self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<(), RepositoryError> {
        let now: DateTime<Utc> = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE tenders SET status = $1, updated_at = $2 WHERE id = $3
            "#,
        )
        .bind(status.as_str())
        .bind(now)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.as_uuid().to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(tender_id = %id.as_uuid()))]
    async fn delete(&self, id: TenderId) -> Result<(), RepositoryError> {
        // boq_items and review_logs cascade via foreign keys
        let result = sqlx::query("DELETE FROM tenders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.as_uuid().to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, skip: u32, take: u32) -> Result<Vec<Tender>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, filename, media_type, size_bytes, extracted_text, instruction,
                   status, created_at, updated_at
            FROM tenders
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(skip as i64)
        .bind(take as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(tender_from_row).collect()
    }

    #[instrument(skip(self, items), fields(tender_id = %tender_id.as_uuid(), item_count = items.len()))]
    async fn replace_items(
        &self,
        tender_id: TenderId,
        items: &[BoqItem],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(query_failed)?;

        sqlx::query("DELETE FROM boq_items WHERE tender_id = $1")
            .bind(tender_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(query_failed)?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO boq_items
                    (id, tender_id, item_number, description, quantity, unit,
                     unit_rate, amount, category)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(item.tender_id.as_uuid())
            .bind(&item.item_number)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(&item.unit)
            .bind(item.unit_rate)
            .bind(item.amount)
            .bind(&item.category)
            .execute(&mut *tx)
            .await
            .map_err(query_failed)?;
        }

        tx.commit().await.map_err(query_failed)?;
        Ok(())
    }

    #[instrument(skip(self), fields(tender_id = %tender_id.as_uuid()))]
    async fn items_for(&self, tender_id: TenderId) -> Result<Vec<BoqItem>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, tender_id, item_number, description, quantity, unit,
                   unit_rate, amount, category
            FROM boq_items
            WHERE tender_id = $1
            "#,
        )
        .bind(tender_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(item_from_row).collect()
    }

    #[instrument(skip(self, entry), fields(tender_id = %entry.tender_id.as_uuid(), action = %entry.action))]
    async fn append_log(&self, entry: &ReviewLogEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO review_logs
                (id, tender_id, action, detail, actor_ip, actor_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.tender_id.as_uuid())
        .bind(entry.action.as_str())
        .bind(&entry.detail)
        .bind(&entry.actor_ip)
        .bind(&entry.actor_id)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(())
    }

    #[instrument(skip(self), fields(tender_id = %tender_id.as_uuid()))]
    async fn logs_for(
        &self,
        tender_id: TenderId,
    ) -> Result<Vec<ReviewLogEntry>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, tender_id, action, detail, actor_ip, actor_id, created_at
            FROM review_logs
            WHERE tender_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(tender_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.iter().map(log_from_row).collect()
    }
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::PipelineError;
use crate::domain::TenderId;
use crate::presentation::state::AppState;

use super::dto::{BoqItemResponse, ReviewLogResponse, TenderResponse};
use super::error::error_response;

const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_take")]
    pub take: u32,
}

fn default_take() -> u32 {
    20
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDetailResponse {
    pub tender: TenderResponse,
    pub extracted_text: String,
    pub items: Vec<BoqItemResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderListResponse {
    pub tenders: Vec<TenderResponse>,
    pub skip: u32,
    pub take: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLogListResponse {
    pub logs: Vec<ReviewLogResponse>,
}

#[tracing::instrument(skip(state))]
pub async fn get_tender_handler(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_tender_id(&tender_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };

    let tender = match state.tender_repository.find_by_id(id).await {
        Ok(Some(tender)) => tender,
        Ok(None) => {
            return error_response(&PipelineError::ResourceNotFound(tender_id)).into_response();
        }
        Err(e) => return error_response(&PipelineError::Storage(e)).into_response(),
    };

    let items = match state.tender_repository.items_for(id).await {
        Ok(items) => items,
        Err(e) => return error_response(&PipelineError::Storage(e)).into_response(),
    };

    (
        StatusCode::OK,
        Json(TenderDetailResponse {
            tender: TenderResponse::from_tender(&tender),
            extracted_text: tender.extracted_text.clone(),
            items: items.iter().map(BoqItemResponse::from_item).collect(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn list_tenders_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let take = params.take.min(MAX_PAGE_SIZE);

    match state.tender_repository.list_recent(params.skip, take).await {
        Ok(tenders) => (
            StatusCode::OK,
            Json(TenderListResponse {
                tenders: tenders.iter().map(TenderResponse::from_tender).collect(),
                skip: params.skip,
                take,
            }),
        )
            .into_response(),
        Err(e) => error_response(&PipelineError::Storage(e)).into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_review_logs_handler(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
) -> impl IntoResponse {
    let id = match parse_tender_id(&tender_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };

    match state.tender_repository.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&PipelineError::ResourceNotFound(tender_id)).into_response();
        }
        Err(e) => return error_response(&PipelineError::Storage(e)).into_response(),
    }

    match state.tender_repository.logs_for(id).await {
        Ok(logs) => (
            StatusCode::OK,
            Json(ReviewLogListResponse {
                logs: logs.iter().map(ReviewLogResponse::from_entry).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(&PipelineError::Storage(e)).into_response(),
    }
}

fn parse_tender_id(raw: &str) -> Result<TenderId, PipelineError> {
    Uuid::parse_str(raw)
        .map(TenderId::from_uuid)
        .map_err(|_| PipelineError::ValidationError(format!("invalid tender id: {}", raw)))
}

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::{ActorContext, PipelineError};
use crate::domain::{BoqItemDraft, Tender, TenderId};
use crate::presentation::state::AppState;

use super::dto::{BoqItemResponse, TenderResponse};
use super::error::error_response;

#[derive(Debug, Default, Deserialize)]
struct ApproveRequest {
    #[serde(default)]
    items: Option<Vec<BoqItemDraft>>,
}

#[derive(Debug, Default, Deserialize)]
struct RejectRequest {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub tender: TenderResponse,
    pub items: Vec<BoqItemResponse>,
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn approve_tender_handler(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let id = match parse_tender_id(&tender_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };
    let request: ApproveRequest = match parse_optional_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&e).into_response(),
    };
    let actor = actor_from_headers(&headers);

    match state.review_service.approve(id, request.items, actor).await {
        Ok(tender) => review_response(&state, tender).await.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, reason = e.reason_code(), "Approve failed");
            error_response(&e).into_response()
        }
    }
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn reject_tender_handler(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let id = match parse_tender_id(&tender_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };
    let request: RejectRequest = match parse_optional_body(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&e).into_response(),
    };
    let actor = actor_from_headers(&headers);

    match state.review_service.reject(id, request.reason, actor).await {
        Ok(tender) => review_response(&state, tender).await.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, reason = e.reason_code(), "Reject failed");
            error_response(&e).into_response()
        }
    }
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn update_items_handler(
    State(state): State<AppState>,
    Path(tender_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let id = match parse_tender_id(&tender_id) {
        Ok(id) => id,
        Err(e) => return error_response(&e).into_response(),
    };
    let items = match parse_items_body(&body) {
        Ok(items) => items,
        Err(e) => return error_response(&e).into_response(),
    };
    let actor = actor_from_headers(&headers);

    match state.review_service.update_items(id, items, actor).await {
        Ok(tender) => review_response(&state, tender).await.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, reason = e.reason_code(), "Item update failed");
            error_response(&e).into_response()
        }
    }
}

fn parse_tender_id(raw: &str) -> Result<TenderId, PipelineError> {
    Uuid::parse_str(raw)
        .map(TenderId::from_uuid)
        .map_err(|_| PipelineError::ValidationError(format!("invalid tender id: {}", raw)))
}

/// Approve and Reject take an optional JSON body; an absent or empty body
/// means "no extras".
fn parse_optional_body<T: Default + for<'de> Deserialize<'de>>(
    body: &Bytes,
) -> Result<T, PipelineError> {
    if body.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| PipelineError::ValidationError(format!("invalid request body: {}", e)))
}

/// Update-Items requires a body with an `items` array; anything else is a
/// validation error, reported in the structured error shape.
fn parse_items_body(body: &Bytes) -> Result<Vec<BoqItemDraft>, PipelineError> {
    if body.is_empty() {
        return Err(PipelineError::ValidationError(
            "request body is required".to_string(),
        ));
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| PipelineError::ValidationError(format!("invalid request body: {}", e)))?;
    let items = value
        .get("items")
        .ok_or_else(|| PipelineError::ValidationError("missing 'items' array".to_string()))?;
    serde_json::from_value(items.clone())
        .map_err(|e| PipelineError::ValidationError(format!("invalid 'items' array: {}", e)))
}

fn actor_from_headers(headers: &HeaderMap) -> ActorContext {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let actor_id = headers
        .get("x-actor-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .filter(|v| !v.is_empty());

    ActorContext { ip, actor_id }
}

async fn review_response(state: &AppState, tender: Tender) -> axum::response::Response {
    let items = match state.tender_repository.items_for(tender.id).await {
        Ok(items) => items,
        Err(e) => {
            return error_response(&PipelineError::Storage(e)).into_response();
        }
    };

    (
        StatusCode::OK,
        Json(ReviewResponse {
            tender: TenderResponse::from_tender(&tender),
            items: items.iter().map(BoqItemResponse::from_item).collect(),
        }),
    )
        .into_response()
}

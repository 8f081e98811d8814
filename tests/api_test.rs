mod helpers;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tenderdesk::application::ports::TenderRepository;
use tenderdesk::application::services::{BoqExtractionService, DocumentService, ReviewService};
use tenderdesk::infrastructure::llm::MockLlmClient;
use tenderdesk::infrastructure::persistence::InMemoryTenderRepository;
use tenderdesk::infrastructure::text_processing::{
    DelimitedTextLoader, PdfLoader, SpreadsheetLoader,
};
use tenderdesk::presentation::{AppState, create_router};

use helpers::{MULTIPART_BOUNDARY, SAMPLE_CSV, multipart_body, sample_extraction_value};

const TEST_BODY_LIMIT: usize = 25 * 1024 * 1024;

fn test_app(llm: MockLlmClient) -> Router {
    let repository: Arc<dyn TenderRepository> = Arc::new(InMemoryTenderRepository::new());
    let extraction = Arc::new(BoqExtractionService::new(Arc::new(llm)));

    let document_service = Arc::new(DocumentService::new(
        Arc::new(PdfLoader::new()),
        Arc::new(SpreadsheetLoader::new()),
        Arc::new(DelimitedTextLoader::new()),
        extraction,
        Arc::clone(&repository),
    ));
    let review_service = Arc::new(ReviewService::new(Arc::clone(&repository)));

    create_router(
        AppState {
            document_service,
            review_service,
            tender_repository: repository,
        },
        TEST_BODY_LIMIT,
    )
}

fn upload_request(requires_review: &str) -> Request<Body> {
    let body = multipart_body(
        "boq.csv",
        "text/csv",
        SAMPLE_CSV,
        &[("requires_review", requires_review)],
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/tenders")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .expect("request builds")
}

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn given_running_service_when_checking_health_then_healthy() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn given_csv_upload_with_review_when_posting_then_pending_review_with_text() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let response = app.oneshot(upload_request("true")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "pending_review");
    assert_eq!(body["itemCount"], 2);
    assert!(body["tenderId"].as_str().is_some());
    assert!(body["extractedText"].as_str().unwrap().contains("Item | Description | Qty | Unit"));
    assert_eq!(body["extraction"]["items"][0]["itemNumber"], "1.01");
}

#[tokio::test]
async fn given_csv_upload_without_review_when_posting_then_completed_without_text() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let response = app.oneshot(upload_request("false")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "completed");
    assert!(body.get("extractedText").is_none());
}

#[tokio::test]
async fn given_pending_tender_when_approving_with_items_then_completed_and_audited() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let upload = app.clone().oneshot(upload_request("true")).await.unwrap();
    let upload_body = body_json(upload).await;
    let tender_id = upload_body["tenderId"].as_str().unwrap().to_string();

    let approve_payload = json!({
        "items": [
            {"itemNumber": "A.1", "description": "revised line", "quantity": 4.0, "unit": "nr"}
        ]
    });
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/tenders/{}/approve", tender_id),
            &approve_payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tender"]["status"], "completed");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["itemNumber"], "A.1");

    let logs_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/tenders/{}/logs", tender_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logs_response.status(), StatusCode::OK);
    let logs = body_json(logs_response).await;
    let actions: Vec<_> = logs["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, vec!["edited", "approved"]);
}

#[tokio::test]
async fn given_pending_tender_when_rejecting_then_rejected_with_reason_logged() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let upload = app.clone().oneshot(upload_request("true")).await.unwrap();
    let upload_body = body_json(upload).await;
    let tender_id = upload_body["tenderId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/tenders/{}/reject", tender_id),
            &json!({ "reason": "incomplete data" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tender"]["status"], "rejected");

    let logs_response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/tenders/{}/logs", tender_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let logs = body_json(logs_response).await;
    assert_eq!(logs["logs"][0]["action"], "rejected");
    assert_eq!(logs["logs"][0]["detail"]["reason"], "incomplete data");
}

#[tokio::test]
async fn given_unknown_tender_when_rejecting_then_structured_not_found() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/tenders/00000000-0000-0000-0000-000000000000/reject",
            &json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "RESOURCE_NOT_FOUND");
    assert!(body["suggestion"].as_str().is_some());
}

#[tokio::test]
async fn given_missing_items_array_when_updating_items_then_validation_error() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let upload = app.clone().oneshot(upload_request("true")).await.unwrap();
    let upload_body = body_json(upload).await;
    let tender_id = upload_body["tenderId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/tenders/{}/items", tender_id),
            &json!({ "nothing": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("items"));
}

#[tokio::test]
async fn given_unsupported_upload_when_posting_then_415_with_accepted_list() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    let body = multipart_body("photo.gif", "image/gif", "GIF89a", &[]);
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/tenders")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "UNSUPPORTED_FILE_TYPE");
    assert!(body["details"]["accepted"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn given_model_auth_failure_when_uploading_then_bad_gateway_with_reason() {
    let app = test_app(MockLlmClient::failing_api("HTTP 401: invalid api key"));

    let response = app.oneshot(upload_request("false")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "AI_AUTH_FAILED");
}

#[tokio::test]
async fn given_uploaded_tender_when_listing_then_it_appears_most_recent_first() {
    let app = test_app(MockLlmClient::responding(sample_extraction_value()));

    app.clone().oneshot(upload_request("false")).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/tenders?skip=0&take=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tenders"].as_array().unwrap().len(), 1);
    assert_eq!(body["tenders"][0]["filename"], "boq.csv");
}

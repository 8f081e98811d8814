#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};

use tenderdesk::application::ports::TenderRepository;
use tenderdesk::application::services::{BoqExtractionService, DocumentService, ReviewService};
use tenderdesk::domain::{BoqItem, BoqItemDraft, Tender, TenderId, TenderStatus};
use tenderdesk::infrastructure::llm::MockLlmClient;
use tenderdesk::infrastructure::persistence::InMemoryTenderRepository;
use tenderdesk::infrastructure::text_processing::{
    DelimitedTextLoader, PdfLoader, SpreadsheetLoader,
};

pub const SAMPLE_CSV: &str = "\
Item,Description,Qty,Unit
1.01,Excavate foundation,25,m3
1.02,Concrete grade 30,12.5,m3
";

pub fn sample_extraction_value() -> Value {
    json!({
        "projectName": "Riverside Depot",
        "projectLocation": null,
        "items": [
            {
                "itemNumber": "1.01",
                "description": "Excavate foundation",
                "quantity": 25.0,
                "unit": "m3",
                "unitRate": 14.0,
                "amount": 350.0,
                "category": "Earthworks"
            },
            {
                "itemNumber": "1.02",
                "description": "Concrete grade 30",
                "quantity": 12.5,
                "unit": "m3",
                "unitRate": null,
                "amount": null,
                "category": null
            }
        ],
        "totalEstimatedCost": 350.0,
        "currency": "USD",
        "notes": null
    })
}

pub fn document_service_with(
    llm: MockLlmClient,
    repository: Arc<InMemoryTenderRepository>,
) -> DocumentService {
    let extraction = Arc::new(BoqExtractionService::new(Arc::new(llm)));
    DocumentService::new(
        Arc::new(PdfLoader::new()),
        Arc::new(SpreadsheetLoader::new()),
        Arc::new(DelimitedTextLoader::new()),
        extraction,
        repository,
    )
}

pub fn review_service_with(repository: Arc<InMemoryTenderRepository>) -> ReviewService {
    ReviewService::new(repository)
}

pub fn draft(item_number: &str, quantity: f64) -> BoqItemDraft {
    BoqItemDraft {
        item_number: item_number.to_string(),
        description: format!("work item {}", item_number),
        quantity,
        unit: "m3".to_string(),
        unit_rate: None,
        amount: None,
        category: None,
    }
}

/// Seeds a pending-review tender with two persisted items, the state an
/// upload with `requires_review=true` leaves behind.
pub async fn seed_pending_tender(repository: &Arc<InMemoryTenderRepository>) -> TenderId {
    let mut tender = Tender::new(
        "boq.csv".to_string(),
        "text/csv".to_string(),
        128,
        "Item | Qty\n--- | ---\n1.01 | 25".to_string(),
        None,
    );
    tender.status = TenderStatus::PendingReview;
    repository.create(&tender).await.expect("create tender");

    let items: Vec<BoqItem> = [draft("1.01", 25.0), draft("1.02", 12.5)]
        .iter()
        .map(|d| BoqItem::from_draft(tender.id, d))
        .collect();
    repository
        .replace_items(tender.id, &items)
        .await
        .expect("seed items");

    tender.id
}

pub const MULTIPART_BOUNDARY: &str = "----tenderdesk-test-boundary";

/// Hand-built multipart body: a `file` part plus optional extra text parts.
pub fn multipart_body(
    filename: &str,
    content_type: &str,
    content: &str,
    extra_fields: &[(&str, &str)],
) -> Vec<u8> {
    let mut body = String::new();
    body.push_str(&format!("--{}\r\n", MULTIPART_BOUNDARY));
    body.push_str(&format!(
        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
        filename
    ));
    body.push_str(&format!("Content-Type: {}\r\n\r\n", content_type));
    body.push_str(content);
    body.push_str("\r\n");

    for (name, value) in extra_fields {
        body.push_str(&format!("--{}\r\n", MULTIPART_BOUNDARY));
        body.push_str(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
            name
        ));
        body.push_str(value);
        body.push_str("\r\n");
    }

    body.push_str(&format!("--{}--\r\n", MULTIPART_BOUNDARY));
    body.into_bytes()
}

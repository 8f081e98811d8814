mod helpers;

use std::sync::Arc;

use uuid::Uuid;

use tenderdesk::application::ports::TenderRepository;
use tenderdesk::application::services::{ActorContext, PipelineError};
use tenderdesk::domain::{ReviewAction, TenderId, TenderStatus};
use tenderdesk::infrastructure::persistence::InMemoryTenderRepository;

use helpers::{draft, review_service_with, seed_pending_tender};

fn actor() -> ActorContext {
    ActorContext {
        ip: Some("10.0.0.7".to_string()),
        actor_id: Some("reviewer-1".to_string()),
    }
}

#[tokio::test]
async fn given_replacement_items_when_approving_then_items_replaced_and_two_logs_appended() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    let replacement: Vec<_> = (1..=5).map(|i| draft(&format!("R.{i}"), i as f64)).collect();
    let tender = service
        .approve(id, Some(replacement), actor())
        .await
        .expect("approve should succeed");

    assert_eq!(tender.status, TenderStatus::Completed);

    // the old two items are fully removed, not merged with the five
    let items = repository.items_for(id).await.unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|i| i.item_number.starts_with("R.")));

    let logs = repository.logs_for(id).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].action, ReviewAction::Edited);
    assert_eq!(logs[0].detail["itemCount"], 5);
    assert_eq!(logs[1].action, ReviewAction::Approved);
    assert_eq!(logs[1].detail["previousStatus"], "pending_review");
    assert_eq!(logs[1].actor_ip.as_deref(), Some("10.0.0.7"));
}

#[tokio::test]
async fn given_no_items_when_approving_then_single_approved_log() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    let tender = service
        .approve(id, None, ActorContext::default())
        .await
        .expect("approve should succeed");

    assert_eq!(tender.status, TenderStatus::Completed);
    assert_eq!(repository.items_for(id).await.unwrap().len(), 2);

    let logs = repository.logs_for(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, ReviewAction::Approved);
}

#[tokio::test]
async fn given_reason_when_rejecting_then_status_and_log_carry_it() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    let tender = service
        .reject(id, Some("incomplete data".to_string()), actor())
        .await
        .expect("reject should succeed");

    assert_eq!(tender.status, TenderStatus::Rejected);

    let logs = repository.logs_for(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, ReviewAction::Rejected);
    assert_eq!(logs[0].detail["reason"], "incomplete data");
    assert_eq!(logs[0].detail["previousStatus"], "pending_review");
}

#[tokio::test]
async fn given_no_reason_when_rejecting_then_explicit_marker_logged() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    service
        .reject(id, None, ActorContext::default())
        .await
        .expect("reject should succeed");

    let logs = repository.logs_for(id).await.unwrap();
    assert_eq!(logs[0].detail["reason"], "no reason provided");
}

#[tokio::test]
async fn given_unknown_tender_when_transitioning_then_not_found_and_no_partial_writes() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let ghost = TenderId::from_uuid(Uuid::new_v4());

    let approve = service.approve(ghost, Some(vec![draft("1", 1.0)]), actor()).await;
    let reject = service.reject(ghost, Some("nope".to_string()), actor()).await;
    let update = service.update_items(ghost, vec![draft("1", 1.0)], actor()).await;

    assert!(matches!(approve, Err(PipelineError::ResourceNotFound(_))));
    assert!(matches!(reject, Err(PipelineError::ResourceNotFound(_))));
    assert!(matches!(update, Err(PipelineError::ResourceNotFound(_))));

    assert!(repository.items_for(ghost).await.unwrap().is_empty());
    assert!(repository.logs_for(ghost).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_same_items_twice_when_updating_then_item_set_idempotent_but_audit_is_not() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    let items = vec![draft("X.1", 7.0), draft("X.2", 9.0), draft("X.3", 2.0)];

    service
        .update_items(id, items.clone(), ActorContext::default())
        .await
        .expect("first update should succeed");
    let tender = service
        .update_items(id, items, ActorContext::default())
        .await
        .expect("second update should succeed");

    assert_eq!(tender.status, TenderStatus::PendingReview);

    let stored = repository.items_for(id).await.unwrap();
    assert_eq!(stored.len(), 3);
    let numbers: Vec<_> = stored.iter().map(|i| i.item_number.as_str()).collect();
    assert_eq!(numbers, vec!["X.1", "X.2", "X.3"]);

    let logs = repository.logs_for(id).await.unwrap();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.action == ReviewAction::ItemsUpdated));
    assert_eq!(logs[0].detail["oldItemCount"], 2);
    assert_eq!(logs[0].detail["newItemCount"], 3);
    assert_eq!(logs[1].detail["oldItemCount"], 3);
    assert_eq!(logs[1].detail["newItemCount"], 3);
}

#[tokio::test]
async fn given_terminal_tender_when_transitioning_then_validation_error_and_no_mutation() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    service
        .approve(id, None, ActorContext::default())
        .await
        .expect("first approve should succeed");

    let second_approve = service.approve(id, Some(vec![draft("Z", 1.0)]), actor()).await;
    let reject = service.reject(id, None, actor()).await;
    let update = service.update_items(id, vec![draft("Z", 1.0)], actor()).await;

    assert!(matches!(second_approve, Err(PipelineError::ValidationError(_))));
    assert!(matches!(reject, Err(PipelineError::ValidationError(_))));
    assert!(matches!(update, Err(PipelineError::ValidationError(_))));

    // the original item set and single approved entry are untouched
    assert_eq!(repository.items_for(id).await.unwrap().len(), 2);
    assert_eq!(repository.logs_for(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_invalid_draft_when_updating_items_then_validation_error_before_mutation() {
    let repository = Arc::new(InMemoryTenderRepository::new());
    let service = review_service_with(Arc::clone(&repository));
    let id = seed_pending_tender(&repository).await;

    let result = service
        .update_items(id, vec![draft("bad", -4.0)], ActorContext::default())
        .await;

    assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    assert_eq!(repository.items_for(id).await.unwrap().len(), 2);
    assert!(repository.logs_for(id).await.unwrap().is_empty());
}

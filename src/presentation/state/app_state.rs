use std::sync::Arc;

use crate::application::ports::TenderRepository;
use crate::application::services::{DocumentService, ReviewService};

pub struct AppState {
    pub document_service: Arc<DocumentService>,
    pub review_service: Arc<ReviewService>,
    pub tender_repository: Arc<dyn TenderRepository>,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
            review_service: Arc::clone(&self.review_service),
            tender_repository: Arc::clone(&self.tender_repository),
        }
    }
}

mod dto;
mod error;
mod health;
mod review;
mod tenders;
mod upload;

pub use dto::{BoqItemResponse, ReviewLogResponse, TenderResponse};
pub use error::{ErrorBody, error_response};
pub use health::health_handler;
pub use review::{approve_tender_handler, reject_tender_handler, update_items_handler};
pub use tenders::{get_review_logs_handler, get_tender_handler, list_tenders_handler};
pub use upload::upload_tender_handler;

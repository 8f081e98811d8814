mod document_service;
pub mod extraction;
mod normalizer;
mod pipeline_error;
mod review_service;

pub use document_service::{DocumentService, ProcessedUpload, UploadRequest};
pub use extraction::BoqExtractionService;
pub use normalizer::render_tabular_text;
pub use pipeline_error::PipelineError;
pub use review_service::{ActorContext, ReviewService};

mod document_loader;
mod llm_client;
mod repository_error;
mod tender_repository;

pub use document_loader::{DocumentLoader, LoadedDocument, LoaderError, SheetData};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use tender_repository::TenderRepository;

use std::sync::Arc;

use crate::application::ports::{DocumentLoader, LoadedDocument, TenderRepository};
use crate::domain::{BoqItem, ExtractionResult, FileFormat, Tender, TenderId, TenderStatus};

use super::extraction::BoqExtractionService;
use super::normalizer::render_tabular_text;
use super::pipeline_error::PipelineError;

/// One upload as the transport layer hands it over.
#[derive(Debug)]
pub struct UploadRequest {
    pub data: Vec<u8>,
    pub filename: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub instruction: Option<String>,
    pub requires_review: bool,
}

/// What the orchestrator returns: the extraction plus the persisted record
/// identifiers. The normalized text is included only when the tender is
/// pending review, for display during the review step.
#[derive(Debug)]
pub struct ProcessedUpload {
    pub tender_id: TenderId,
    pub status: TenderStatus,
    pub item_count: usize,
    pub extraction: ExtractionResult,
    pub extracted_text: Option<String>,
}

/// Orchestrates one upload end to end: format dispatch, loading,
/// normalization, extraction, persistence. Processing is synchronous
/// within the request; a failed extraction propagates with its
/// classification, never retried here.
pub struct DocumentService {
    pdf_loader: Arc<dyn DocumentLoader>,
    spreadsheet_loader: Arc<dyn DocumentLoader>,
    delimited_text_loader: Arc<dyn DocumentLoader>,
    extraction: Arc<BoqExtractionService>,
    repository: Arc<dyn TenderRepository>,
}

impl DocumentService {
    pub fn new(
        pdf_loader: Arc<dyn DocumentLoader>,
        spreadsheet_loader: Arc<dyn DocumentLoader>,
        delimited_text_loader: Arc<dyn DocumentLoader>,
        extraction: Arc<BoqExtractionService>,
        repository: Arc<dyn TenderRepository>,
    ) -> Self {
        Self {
            pdf_loader,
            spreadsheet_loader,
            delimited_text_loader,
            extraction,
            repository,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            filename = %request.filename,
            media_type = %request.media_type,
            size_bytes = request.size_bytes,
            requires_review = request.requires_review,
        )
    )]
    pub async fn process_upload(
        &self,
        request: UploadRequest,
    ) -> Result<ProcessedUpload, PipelineError> {
        let format = FileFormat::from_mime(&request.media_type).ok_or_else(|| {
            PipelineError::UnsupportedFileType {
                given: request.media_type.clone(),
            }
        })?;

        let loader = match format {
            FileFormat::Pdf => &self.pdf_loader,
            FileFormat::Spreadsheet => &self.spreadsheet_loader,
            FileFormat::DelimitedText => &self.delimited_text_loader,
        };

        let text = match loader.load(&request.data, &request.filename).await? {
            LoadedDocument::Text(text) => text,
            LoadedDocument::Tabular(sheets) => render_tabular_text(&sheets),
        };

        tracing::debug!(format = format.as_label(), text_len = text.len(), "Document loaded");

        let extraction = self
            .extraction
            .extract(&text, request.instruction.as_deref())
            .await?;

        let status = if request.requires_review {
            TenderStatus::PendingReview
        } else {
            TenderStatus::Completed
        };

        let mut tender = Tender::new(
            request.filename,
            request.media_type,
            request.size_bytes,
            text.clone(),
            request.instruction,
        );
        tender.status = status;

        self.repository.create(&tender).await?;

        let items: Vec<BoqItem> = extraction
            .items
            .iter()
            .map(|draft| BoqItem::from_draft(tender.id, draft))
            .collect();
        self.repository.replace_items(tender.id, &items).await?;

        tracing::info!(
            tender_id = %tender.id.as_uuid(),
            status = %status,
            item_count = items.len(),
            "Upload processed"
        );

        Ok(ProcessedUpload {
            tender_id: tender.id,
            status,
            item_count: items.len(),
            extraction,
            extracted_text: request.requires_review.then_some(text),
        })
    }
}

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{DocumentLoader, LoadedDocument, LoaderError};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts the text layer of a PDF. Scanned/image-only documents have no
/// text layer and surface as `EmptyFile`; OCR is out of scope.
#[derive(Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    #[tracing::instrument(skip(self, data), fields(filename = %filename, size = data.len()))]
    async fn load(&self, data: &[u8], filename: &str) -> Result<LoadedDocument, LoaderError> {
        let bytes = data.to_vec();

        let raw = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes)
                    .map_err(|e| classify_pdf_error(&e.to_string()))
            }),
        )
        .await
        .map_err(|_| LoaderError::Parsing("PDF extraction timed out".to_string()))?
        .map_err(|e| LoaderError::Parsing(format!("task join error: {e}")))??;

        let text = assemble_pages(&raw);

        if text.trim().is_empty() {
            return Err(LoaderError::EmptyFile(format!(
                "no extractable text in {}",
                filename
            )));
        }

        tracing::info!(text_len = text.len(), "PDF text extraction complete");

        Ok(LoadedDocument::Text(text))
    }
}

/// The extractor yields the whole document with form feeds between pages.
/// Split there, sanitize each page, and rejoin with page context markers.
pub fn assemble_pages(raw: &str) -> String {
    raw.split('\u{0C}')
        .map(sanitize_extracted_text)
        .enumerate()
        .filter(|(_, page)| !page.is_empty())
        .map(|(index, page)| format!("--- Page {} ---\n{}", index + 1, page))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Best-effort classification of a PDF decode failure from its message.
pub fn classify_pdf_error(message: &str) -> LoaderError {
    let lowered = message.to_lowercase();

    if lowered.contains("encrypt") || lowered.contains("password") {
        return LoaderError::PasswordProtected(format!(
            "the PDF is encrypted: {}",
            message
        ));
    }

    const STRUCTURAL: &[&str] = &[
        "corrupt", "damaged", "malformed", "invalid", "trailer", "xref", "eof", "header",
    ];
    if STRUCTURAL.iter().any(|p| lowered.contains(p)) {
        return LoaderError::CorruptFile(message.to_string());
    }

    LoaderError::Parsing(message.to_string())
}

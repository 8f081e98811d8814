use async_trait::async_trait;

/// Converts raw file bytes into the canonical pre-normalization shape:
/// a flat text blob (PDF) or a set of tabular record sheets.
///
/// Loaders read their input and nothing else; temporary-file cleanup is
/// the transport layer's responsibility.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, data: &[u8], filename: &str) -> Result<LoadedDocument, LoaderError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDocument {
    /// Flat text with page context markers already in place.
    Text(String),
    /// One entry per sheet; delimited-text input produces a single sheet.
    Tabular(Vec<SheetData>),
}

/// One sheet (or record list) as a header row plus string-valued records.
/// Records may be ragged; the normalizer pads missing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("file contains no usable content: {0}")]
    EmptyFile(String),
    #[error("file appears to be corrupted: {0}")]
    CorruptFile(String),
    #[error("file is password protected: {0}")]
    PasswordProtected(String),
    #[error("failed to parse file: {0}")]
    Parsing(String),
}

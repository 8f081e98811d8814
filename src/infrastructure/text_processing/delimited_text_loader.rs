use async_trait::async_trait;

use crate::application::ports::{DocumentLoader, LoadedDocument, LoaderError, SheetData};

use super::tabular::{is_blank_row, synthesize_headers};

/// Parses comma/tab-delimited text. Ragged rows are accepted rather than
/// rejected; blank lines are skipped. Produces a single record set named
/// after the uploaded file.
#[derive(Default)]
pub struct DelimitedTextLoader;

impl DelimitedTextLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentLoader for DelimitedTextLoader {
    #[tracing::instrument(skip(self, data), fields(filename = %filename, size = data.len()))]
    async fn load(&self, data: &[u8], filename: &str) -> Result<LoadedDocument, LoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(detect_delimiter(data))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let header_cells: Vec<String> = reader
            .headers()
            .map_err(|e| LoaderError::Parsing(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        if header_cells.is_empty() || is_blank_row(&header_cells) {
            return Err(LoaderError::EmptyFile(format!(
                "no columns detected in {}",
                filename
            )));
        }

        let headers = synthesize_headers(&header_cells);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| LoaderError::Parsing(e.to_string()))?;
            let cells: Vec<String> = record.iter().map(str::to_string).collect();
            if !is_blank_row(&cells) {
                rows.push(cells);
            }
        }

        if rows.is_empty() {
            return Err(LoaderError::EmptyFile(format!(
                "no data rows in {}",
                filename
            )));
        }

        tracing::info!(row_count = rows.len(), column_count = headers.len(), "Delimited text loaded");

        Ok(LoadedDocument::Tabular(vec![SheetData {
            name: filename.to_string(),
            headers,
            rows,
        }]))
    }
}

/// Tab-separated input is accepted alongside commas; sniff the first line.
pub fn detect_delimiter(data: &[u8]) -> u8 {
    let first_line = data.split(|b| *b == b'\n').next().unwrap_or(&[]);
    let tabs = first_line.iter().filter(|b| **b == b'\t').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    if tabs > commas { b'\t' } else { b',' }
}

use std::io::Cursor;

use async_trait::async_trait;
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::application::ports::{DocumentLoader, LoadedDocument, LoaderError, SheetData};

use super::tabular::{is_blank_row, synthesize_headers};

/// Reads xlsx/xls/xlsb/ods workbooks. The first row of each sheet becomes
/// the column headers; formula and rich-text cells are reduced to their
/// display strings.
#[derive(Default)]
pub struct SpreadsheetLoader;

impl SpreadsheetLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentLoader for SpreadsheetLoader {
    #[tracing::instrument(skip(self, data), fields(filename = %filename, size = data.len()))]
    async fn load(&self, data: &[u8], filename: &str) -> Result<LoadedDocument, LoaderError> {
        let cursor = Cursor::new(data.to_vec());
        let mut workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| classify_workbook_error(&e.to_string()))?;

        let sheet_names = workbook.sheet_names().to_owned();
        if sheet_names.is_empty() {
            return Err(LoaderError::EmptyFile(format!(
                "workbook {} has no sheets",
                filename
            )));
        }

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| classify_workbook_error(&e.to_string()))?;

            let mut rows = range.rows().map(cells_to_strings);

            let headers = rows
                .next()
                .map(|first| synthesize_headers(&first))
                .unwrap_or_default();

            let records: Vec<Vec<String>> =
                rows.filter(|row| !is_blank_row(row)).collect();

            sheets.push(SheetData {
                name,
                headers,
                rows: records,
            });
        }

        if sheets.iter().all(|s| s.rows.is_empty()) {
            return Err(LoaderError::EmptyFile(format!(
                "workbook {} has no data rows in any sheet",
                filename
            )));
        }

        tracing::info!(sheet_count = sheets.len(), "Workbook loaded");

        Ok(LoadedDocument::Tabular(sheets))
    }
}

fn cells_to_strings(cells: &[Data]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Best-effort classification of a workbook decode failure from its
/// message. Password protection gets its own signal, distinct from
/// generic corruption.
pub fn classify_workbook_error(message: &str) -> LoaderError {
    let lowered = message.to_lowercase();

    if lowered.contains("password") || lowered.contains("encrypt") {
        return LoaderError::PasswordProtected(format!(
            "the workbook is password protected: {}",
            message
        ));
    }

    const STRUCTURAL: &[&str] = &["zip", "corrupt", "invalid", "unsupported", "malformed", "cfb"];
    if STRUCTURAL.iter().any(|p| lowered.contains(p)) {
        return LoaderError::CorruptFile(message.to_string());
    }

    LoaderError::Parsing(message.to_string())
}

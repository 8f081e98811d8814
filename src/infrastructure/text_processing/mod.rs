mod delimited_text_loader;
mod pdf_loader;
mod spreadsheet_loader;
mod tabular;
mod text_sanitizer;

pub use delimited_text_loader::{DelimitedTextLoader, detect_delimiter};
pub use pdf_loader::{PdfLoader, assemble_pages, classify_pdf_error};
pub use spreadsheet_loader::{SpreadsheetLoader, classify_workbook_error};
pub use tabular::{is_blank_row, synthesize_headers};
pub use text_sanitizer::sanitize_extracted_text;

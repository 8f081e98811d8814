/// The closed set of intake formats. Dispatch on this everywhere with an
/// exhaustive `match`, so adding a format is a compile-time-enforced change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Pdf,
    Spreadsheet,
    DelimitedText,
}

const PDF_MIME: &str = "application/pdf";

const SPREADSHEET_MIMES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/vnd.oasis.opendocument.spreadsheet",
];

const DELIMITED_TEXT_MIMES: &[&str] = &[
    "text/csv",
    "application/csv",
    "text/tab-separated-values",
];

impl FileFormat {
    /// Parses a declared media type, ignoring parameters such as
    /// `; charset=utf-8`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(PDF_MIME) {
            return Some(Self::Pdf);
        }
        if SPREADSHEET_MIMES.iter().any(|m| essence.eq_ignore_ascii_case(m)) {
            return Some(Self::Spreadsheet);
        }
        if DELIMITED_TEXT_MIMES.iter().any(|m| essence.eq_ignore_ascii_case(m)) {
            return Some(Self::DelimitedText);
        }
        None
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "PDF",
            FileFormat::Spreadsheet => "spreadsheet",
            FileFormat::DelimitedText => "delimited text",
        }
    }

    /// Every media type the pipeline accepts, for error reporting.
    pub fn accepted_mime_types() -> Vec<&'static str> {
        let mut accepted = vec![PDF_MIME];
        accepted.extend_from_slice(SPREADSHEET_MIMES);
        accepted.extend_from_slice(DELIMITED_TEXT_MIMES);
        accepted
    }
}

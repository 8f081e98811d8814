use crate::application::ports::SheetData;

const CELL_DELIMITER: &str = " | ";

/// Renders a loader's tabular output as one markdown-like text blob — the
/// only representation the extraction adapter ever sees. Loaders plus this
/// renderer form the format-independence boundary.
///
/// Per sheet: a source-unit header, a row/column summary, the header row,
/// a separator, then one delimiter-joined line per record. Missing cells
/// render as empty strings; sheets without data rows render an explicit
/// `(empty)` marker instead of being omitted.
pub fn render_tabular_text(sheets: &[SheetData]) -> String {
    let mut out = String::new();

    for (index, sheet) in sheets.iter().enumerate() {
        if index > 0 {
            out.push_str("\n\n");
        }

        out.push_str("### Sheet: ");
        out.push_str(&sheet.name);
        out.push('\n');
        out.push_str(&format!(
            "Rows: {}, Columns: {}\n",
            sheet.rows.len(),
            sheet.headers.len()
        ));

        if sheet.rows.is_empty() {
            out.push_str("(empty)");
            continue;
        }

        out.push_str(&sheet.headers.join(CELL_DELIMITER));
        out.push('\n');
        out.push_str(
            &sheet
                .headers
                .iter()
                .map(|_| "---")
                .collect::<Vec<_>>()
                .join(CELL_DELIMITER),
        );

        for row in &sheet.rows {
            out.push('\n');
            let width = sheet.headers.len().max(row.len());
            let line = (0..width)
                .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                .collect::<Vec<_>>()
                .join(CELL_DELIMITER);
            out.push_str(&line);
        }
    }

    out
}

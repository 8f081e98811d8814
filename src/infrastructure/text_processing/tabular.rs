//! Shared record-shaping rules for the tabular loaders.

/// First-row cells become column headers; blank cells get a synthesized
/// `ColumnN` label (1-based) so every record key is addressable.
pub fn synthesize_headers(cells: &[String]) -> Vec<String> {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                format!("Column{}", i + 1)
            } else {
                trimmed.to_string()
            }
        })
        .collect()
}

/// A record is blank when every cell is empty after trimming; such rows
/// are dropped rather than rendered.
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

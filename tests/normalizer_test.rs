use tenderdesk::application::ports::SheetData;
use tenderdesk::application::services::render_tabular_text;

fn sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> SheetData {
    SheetData {
        name: name.to_string(),
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

#[test]
fn given_headers_and_one_row_when_rendering_then_join_convention_holds() {
    let text = render_tabular_text(&[sheet("Sheet1", &["Item", "Qty"], &[&["A", "3"]])]);

    assert!(text.contains("Item | Qty"), "got:\n{text}");
    assert!(text.contains("A | 3"), "got:\n{text}");
}

#[test]
fn given_a_sheet_when_rendering_then_summary_and_separator_present() {
    let text = render_tabular_text(&[sheet("Bill 2", &["Item", "Qty"], &[&["A", "3"]])]);

    assert!(text.contains("### Sheet: Bill 2"));
    assert!(text.contains("Rows: 1, Columns: 2"));
    assert!(text.contains("--- | ---"));
}

#[test]
fn given_empty_sheet_when_rendering_then_explicit_empty_marker() {
    let text = render_tabular_text(&[
        sheet("Summary", &[], &[]),
        sheet("Data", &["Item", "Qty"], &[&["A", "3"]]),
    ]);

    // the vacant unit is still visible downstream, not silently omitted
    assert!(text.contains("### Sheet: Summary"));
    assert!(text.contains("(empty)"));
    assert!(text.contains("### Sheet: Data"));
}

#[test]
fn given_short_row_when_rendering_then_missing_cells_render_empty() {
    let text = render_tabular_text(&[sheet("S", &["A", "B", "C"], &[&["only"]])]);

    assert!(text.contains("only |  | "), "got:\n{text}");
}

#[test]
fn given_surplus_cells_when_rendering_then_they_are_kept() {
    let text = render_tabular_text(&[sheet("S", &["A"], &[&["x", "overflow"]])]);

    assert!(text.contains("x | overflow"));
}

#[test]
fn given_multiple_sheets_when_rendering_then_all_are_present_in_order() {
    let text = render_tabular_text(&[
        sheet("First", &["H"], &[&["1"]]),
        sheet("Second", &["H"], &[&["2"]]),
    ]);

    let first = text.find("### Sheet: First").expect("first sheet present");
    let second = text.find("### Sheet: Second").expect("second sheet present");
    assert!(first < second);
}

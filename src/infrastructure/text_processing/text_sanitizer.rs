use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<head>\w)-[ \t]*\r?\n[ \t]*(?P<tail>\w)").unwrap());

/// Cleans text extracted from a PDF page: NFKC normalization, merging of
/// words hyphenated across line breaks, and whitespace collapsing while
/// paragraph breaks (blank lines) are preserved.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let merged = HYPHEN_LINE_BREAK.replace_all(&normalized, "$head$tail");

    let mut out = String::with_capacity(merged.len());
    let mut pending_break: Option<&str> = None;

    for line in merged.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }

        if let Some(sep) = pending_break.take() {
            out.push_str(sep);
        } else if !out.is_empty() {
            out.push('\n');
        }

        let mut last_was_space = false;
        for ch in trimmed.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
    }

    out
}

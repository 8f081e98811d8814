use chrono::NaiveDate;

const TASK_INSTRUCTIONS: &str = "\
You are reading a construction tender document. Extract its Bill of \
Quantities (BOQ) as structured data.

For every line item capture:
- itemNumber: the reference exactly as printed (it may not be numeric)
- description: the work item description
- quantity: a positive number
- unit: the unit of measure as printed
- unitRate and amount: only when the document states them
- category: the trade or section heading the item falls under, if any

Also capture the project name, project location, total estimated cost and \
currency when the document states them. Keep items in document order. Do \
not invent values that are not in the document; use null for anything \
absent, and record assumptions in the notes field.";

/// Builds the extraction prompt. A caller-supplied instruction string is
/// spliced in as a delimited block ahead of the document text so the model
/// treats it as higher-priority guidance.
pub fn build_extraction_prompt(
    document_text: &str,
    instruction: Option<&str>,
    today: NaiveDate,
) -> String {
    let mut prompt = String::with_capacity(document_text.len() + 1024);

    prompt.push_str(TASK_INSTRUCTIONS);
    prompt.push_str("\n\nToday's date is ");
    prompt.push_str(&today.format("%Y-%m-%d").to_string());
    prompt.push('.');

    if let Some(instruction) = instruction.map(str::trim).filter(|i| !i.is_empty()) {
        prompt.push_str("\n\n=== USER INSTRUCTIONS (apply these with priority) ===\n");
        prompt.push_str(instruction);
        prompt.push_str("\n=== END USER INSTRUCTIONS ===");
    }

    prompt.push_str("\n\n=== DOCUMENT ===\n");
    prompt.push_str(document_text);

    prompt
}

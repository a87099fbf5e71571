//! Data-file editor
//!
//! Text-preserving edits: each function returns the new file contents and
//! leaves every byte outside the edited span untouched.

use crate::error::{DocumentError, Result};
use crate::lexer::{line_end, mask_comments};
use crate::parser::{locate_block_masked, locate_records, Block};
use crate::types::{CertificateRecord, NewRecord, ProjectRecord, RecordSummary};

const DEFAULT_INDENT: &str = "  ";

/// Next id for a collection: `max(id) + 1`, or `1` when empty
///
/// # Examples
/// ```
/// use portfolio_sync_common::{next_id, RecordSummary};
///
/// assert_eq!(next_id(&[]), 1);
/// let records = vec![
///     RecordSummary { id: 3, ..Default::default() },
///     RecordSummary { id: 7, ..Default::default() },
/// ];
/// assert_eq!(next_id(&records), 8);
/// ```
pub fn next_id(records: &[RecordSummary]) -> u32 {
    records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
}

/// Append `record` immediately before the closing `]` of collection `name`.
///
/// A comma is added after the previous element when it has none, and the
/// indentation of the first existing record is reused.
pub fn append_record(text: &str, name: &str, record: &NewRecord) -> Result<String> {
    let masked = mask_comments(text);
    let block = locate_block_masked(&masked, name)?;
    let indent = record_indent(text, &masked, &block);
    let literal = render_record(record, &indent);

    // last significant byte before `]`, ignoring whitespace and comments
    let before = &masked[block.inner()];
    let insert_at = block.open + 1 + before.trim_end().len();
    let needs_comma = !before.trim().is_empty() && !before.trim_end().ends_with(',');
    // a comment trailing the last element stays on its line
    let after_line = line_end(text.as_bytes(), insert_at, block.close).unwrap_or(insert_at);

    let mut out = String::with_capacity(text.len() + literal.len() + 4);
    out.push_str(&text[..insert_at]);
    if needs_comma {
        out.push(',');
    }
    out.push_str(&text[insert_at..after_line]);
    out.push('\n');
    out.push_str(&literal);
    out.push(',');
    if !text[after_line..block.close].contains('\n') {
        out.push('\n');
    }
    out.push_str(&text[after_line..]);
    Ok(out)
}

/// Replace the `gambar` value of record `id` in collection `name`.
///
/// A quoted value keeps its quote character; a bare value is wrapped in
/// double quotes.
pub fn replace_image(text: &str, name: &str, id: u32, file_name: &str) -> Result<String> {
    let masked = mask_comments(text);
    let block = locate_block_masked(&masked, name)?;
    let records = locate_records(&masked, &block);

    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| DocumentError::RecordNotFound {
            collection: name.to_string(),
            id,
        })?;
    let field = record
        .gambar
        .as_ref()
        .ok_or(DocumentError::FieldNotFound { id, field: "gambar" })?;

    let replacement = match field.quote {
        Some(q) => quote_with(file_name, q),
        None => js_string(file_name),
    };

    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..field.span.start]);
    out.push_str(&replacement);
    out.push_str(&text[field.span.end..]);
    Ok(out)
}

fn record_indent(text: &str, masked: &str, block: &Block) -> String {
    locate_records(masked, block)
        .first()
        .and_then(|r| {
            let line_start = text[..r.span.start].rfind('\n').map_or(0, |p| p + 1);
            let prefix = &text[line_start..r.span.start];
            prefix.chars().all(|c| c == ' ' || c == '\t').then(|| prefix.to_string())
        })
        .filter(|indent| !indent.is_empty())
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

/// Render a record as an object literal (without trailing comma)
pub fn render_record(record: &NewRecord, indent: &str) -> String {
    let field_indent = format!("{indent}{DEFAULT_INDENT}");
    let fields = match record {
        NewRecord::Certificate(c) => certificate_fields(c),
        NewRecord::Project(p) => project_fields(p),
    };

    let mut out = format!("{indent}{{\n");
    for (key, value) in fields {
        out.push_str(&format!("{field_indent}{key}: {value},\n"));
    }
    out.push_str(&format!("{indent}}}"));
    out
}

fn certificate_fields(c: &CertificateRecord) -> Vec<(&'static str, String)> {
    vec![
        ("id", c.id.to_string()),
        ("gambar", js_string(&c.gambar)),
        ("judul", js_string(&c.judul)),
        ("link", js_string(&c.link)),
    ]
}

fn project_fields(p: &ProjectRecord) -> Vec<(&'static str, String)> {
    let tech = p.tech.iter().map(|t| js_string(t)).collect::<Vec<_>>().join(", ");
    let mut fields = vec![
        ("id", p.id.to_string()),
        ("gambar", js_string(&p.gambar)),
        ("judul", js_string(&p.judul)),
        ("parag", js_string(&p.parag)),
        ("tech", format!("[{tech}]")),
        ("linkDemo", js_string(&p.link_demo)),
        ("linkCode", js_string(&p.link_code)),
    ];
    if let Some(flag) = p.is_coming_soon {
        fields.push(("isComingSoon", flag.to_string()));
    }
    fields
}

/// Double-quoted JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn quote_with(value: &str, quote: char) -> String {
    if quote == '"' {
        return js_string(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        if c == quote || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

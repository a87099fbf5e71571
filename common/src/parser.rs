//! Data-file parser
//!
//! Locates the live `const <name> = [ … ]` array of a collection and reads
//! the `{ … }` records inside it.
//!
//! ## Flow
//! 1. Mask comments so commented-out legacy blocks are invisible
//! 2. Anchor on the declaration, then bracket-match to the closing `]`
//! 3. Split the block into top-level objects and read `id` / `gambar` / `judul`

use crate::error::{DocumentError, Result};
use crate::lexer::{find_matching, mask_comments, skip_string, unescape};
use crate::types::RecordSummary;
use regex::Regex;
use std::ops::Range;

lazy_static::lazy_static! {
    static ref BARE_KEY: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").unwrap();
    static ref INTEGER: Regex = Regex::new(r"^\d+").unwrap();
}

/// Position of a collection's array literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Byte index of the opening `[`
    pub open: usize,
    /// Byte index of the closing `]`
    pub close: usize,
}

impl Block {
    /// Byte range strictly between the brackets
    pub fn inner(&self) -> Range<usize> {
        self.open + 1..self.close
    }
}

/// A field value inside a record, with its absolute byte span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Span of the value including any quotes
    pub span: Range<usize>,
    /// Quote character, `None` for a bare value
    pub quote: Option<char>,
    /// Value with quotes removed and escapes resolved
    pub value: String,
}

/// A record located inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    /// Span from `{` to `}` inclusive
    pub span: Range<usize>,
    pub id: u32,
    pub gambar: Option<FieldValue>,
    pub judul: Option<FieldValue>,
}

impl LocatedRecord {
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            gambar: self.gambar.as_ref().map(|f| f.value.clone()),
            judul: self.judul.as_ref().map(|f| f.value.clone()),
        }
    }
}

/// Locate the live declaration of `name` in the data file.
///
/// Accepts `const`, `let` and `var`, with or without `export`.
///
/// # Arguments
/// * `text` - data-file contents
/// * `name` - collection variable name, e.g. `projectsData`
///
/// # Returns
/// * `Err(BlockNotFound)` - no uncommented declaration exists
/// * `Err(UnterminatedBlock)` - the array is never closed
pub fn locate_block(text: &str, name: &str) -> Result<Block> {
    locate_block_masked(&mask_comments(text), name)
}

pub(crate) fn locate_block_masked(masked: &str, name: &str) -> Result<Block> {
    let pattern = format!(r"\b(?:const|let|var)\s+{}\s*=\s*\[", regex::escape(name));
    let decl = Regex::new(&pattern).map_err(|_| DocumentError::BlockNotFound(name.to_string()))?;

    let found = decl
        .find(masked)
        .ok_or_else(|| DocumentError::BlockNotFound(name.to_string()))?;
    let open = found.end() - 1;
    let close = find_matching(masked, open)
        .ok_or_else(|| DocumentError::UnterminatedBlock(name.to_string()))?;

    Ok(Block { open, close })
}

/// Read the records of collection `name`.
///
/// An existing but empty collection yields an empty list; objects that
/// carry no numeric `id` are skipped.
pub fn extract_records(text: &str, name: &str) -> Result<Vec<RecordSummary>> {
    let masked = mask_comments(text);
    let block = locate_block_masked(&masked, name)?;
    Ok(locate_records(&masked, &block)
        .iter()
        .map(LocatedRecord::summary)
        .collect())
}

/// Locate every top-level object of `block` in the masked text
pub fn locate_records(masked: &str, block: &Block) -> Vec<LocatedRecord> {
    let bytes = masked.as_bytes();
    let mut records = Vec::new();
    let mut i = block.open + 1;

    while i < block.close {
        match bytes[i] {
            q @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i, q);
            }
            b'{' => {
                let Some(end) = find_matching(masked, i) else {
                    break;
                };
                if let Some(record) = read_record(masked, i..end + 1) {
                    records.push(record);
                }
                i = end + 1;
            }
            b'[' | b'(' => {
                i = find_matching(masked, i).map_or(block.close, |end| end + 1);
            }
            _ => i += 1,
        }
    }

    records
}

fn read_record(masked: &str, span: Range<usize>) -> Option<LocatedRecord> {
    let body = &masked[span.clone()];
    let fields = top_level_fields(body);
    let value_at = |key: &str| fields.iter().find(|(k, _)| k == key).map(|(_, at)| *at);

    let id = INTEGER.find(&body[value_at("id")?..])?.as_str().parse().ok()?;

    Some(LocatedRecord {
        id,
        gambar: value_at("gambar").and_then(|at| read_value(body, span.start, at)),
        judul: value_at("judul").and_then(|at| read_value(body, span.start, at)),
        span,
    })
}

/// Top-level `key: value` pairs of an object literal, as (key, value offset).
///
/// `body` runs from `{` to `}`. Keys inside string values or nested
/// objects and arrays are never reported.
fn top_level_fields(body: &str) -> Vec<(String, usize)> {
    let bytes = body.as_bytes();
    let end = body.len().saturating_sub(1);
    let mut fields = Vec::new();
    let mut i = 1;

    while i < end {
        if bytes[i].is_ascii_whitespace() || bytes[i] == b',' {
            i += 1;
            continue;
        }

        let key = match bytes[i] {
            q @ (b'"' | b'\'') => {
                let close = skip_string(bytes, i, q);
                let inner_end = if close > i + 1 && bytes[close - 1] == q { close - 1 } else { close };
                let key = unescape(&body[i + 1..inner_end]);
                i = close;
                Some(key)
            }
            _ => match BARE_KEY.find(&body[i..]) {
                Some(m) => {
                    i += m.end();
                    Some(m.as_str().to_string())
                }
                None => None,
            },
        };

        i = skip_whitespace(bytes, i, end);
        if let Some(key) = key {
            if i < end && bytes[i] == b':' {
                i = skip_whitespace(bytes, i + 1, end);
                fields.push((key, i));
            }
        }
        i = skip_value(body, i, end);
    }

    fields
}

fn skip_whitespace(bytes: &[u8], mut i: usize, end: usize) -> usize {
    while i < end && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Index just past the top-level `,` ending the value at `i` (or `end`)
fn skip_value(body: &str, mut i: usize, end: usize) -> usize {
    let bytes = body.as_bytes();
    while i < end {
        match bytes[i] {
            b',' => return i + 1,
            q @ (b'"' | b'\'' | b'`') => i = skip_string(bytes, i, q),
            b'{' | b'[' | b'(' => i = find_matching(body, i).map_or(end, |close| close + 1),
            _ => i += 1,
        }
    }
    end
}

/// Read the value starting at `start` in a record body.
///
/// Quoted values end at their closing quote; bare values (identifiers,
/// unquoted filenames) end at the next `,`, `}` or newline.
fn read_value(body: &str, offset: usize, start: usize) -> Option<FieldValue> {
    let bytes = body.as_bytes();

    match *bytes.get(start)? {
        q @ (b'"' | b'\'' | b'`') => {
            let end = skip_string(bytes, start, q);
            let inner_end = if bytes.get(end - 1) == Some(&q) && end - 1 > start {
                end - 1
            } else {
                end
            };
            Some(FieldValue {
                span: offset + start..offset + end,
                quote: Some(q as char),
                value: unescape(&body[start + 1..inner_end]),
            })
        }
        _ => {
            let rest = &body[start..];
            let len = rest.find([',', '}', '\n']).unwrap_or(rest.len());
            let value = rest[..len].trim_end();
            if value.is_empty() {
                return None;
            }
            Some(FieldValue {
                span: offset + start..offset + start + value.len(),
                quote: None,
                value: value.to_string(),
            })
        }
    }
}

/// Whether `file_name` is referenced anywhere in the live (uncommented) text.
///
/// The match must stand alone as a file name: `a.png` does not match inside
/// `data.png` or `a.png.bak`.
pub fn references(text: &str, file_name: &str) -> bool {
    references_masked(&mask_comments(text), file_name)
}

pub(crate) fn references_masked(masked: &str, file_name: &str) -> bool {
    if file_name.is_empty() {
        return false;
    }
    masked.match_indices(file_name).any(|(pos, _)| {
        let before = masked[..pos].chars().next_back();
        let after = masked[pos + file_name.len()..].chars().next();
        !before.is_some_and(is_name_char) && !after.is_some_and(is_name_char)
    })
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"import React from "react";

// export const projectsData = [
//   { id: 9, gambar: "legacy.png", judul: "Old" },
// ];

export const certificatesData = [
  {
    id: 1,
    gambar: "aws.png",
    judul: "AWS Cloud Practitioner",
    link: "https://www.credly.com/badges/1",
  },
  {
    id: 2,
    gambar: oldpic.jpg,
    judul: 'Dicoding [Web]',
    link: "#",
  },
];

export const projectsData = [
  {
    id: 1,
    gambar: "a.png",
    judul: "Portfolio",
    parag: "Personal site {v2}",
    tech: ["React", "Tailwind"],
    linkDemo: "#",
    linkCode: "#",
  },
];
"##;

    #[test]
    fn test_locate_block_skips_commented_declaration() {
        let block = locate_block(SAMPLE, "projectsData").unwrap();
        let inner = &SAMPLE[block.inner()];
        assert!(inner.contains("Portfolio"));
        assert!(!inner.contains("legacy.png"));
        assert_eq!(&SAMPLE[block.close..block.close + 2], "];");
    }

    #[test]
    fn test_locate_block_missing() {
        let err = locate_block(SAMPLE, "blogData").unwrap_err();
        assert_eq!(err, DocumentError::BlockNotFound("blogData".into()));
    }

    #[test]
    fn test_locate_block_name_is_whole_word() {
        let err = locate_block(SAMPLE, "Data").unwrap_err();
        assert!(matches!(err, DocumentError::BlockNotFound(_)));
    }

    #[test]
    fn test_locate_block_unterminated() {
        let err = locate_block("const projectsData = [ { id: 1 }", "projectsData").unwrap_err();
        assert!(matches!(err, DocumentError::UnterminatedBlock(_)));
    }

    #[test]
    fn test_extract_records() {
        let certs = extract_records(SAMPLE, "certificatesData").unwrap();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].id, 1);
        assert_eq!(certs[0].gambar.as_deref(), Some("aws.png"));
        assert_eq!(certs[1].gambar.as_deref(), Some("oldpic.jpg"));
        assert_eq!(certs[1].judul.as_deref(), Some("Dicoding [Web]"));

        let projects = extract_records(SAMPLE, "projectsData").unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].judul.as_deref(), Some("Portfolio"));
    }

    #[test]
    fn test_extract_records_empty_block() {
        let records = extract_records("export const projectsData = [];", "projectsData").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_records_skips_objects_without_id() {
        let text = r#"const certificatesData = [{ gambar: "x.png" }, { "id": 4, "gambar": "y.png" }];"#;
        let records = extract_records(text, "certificatesData").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 4);
        assert_eq!(records[0].gambar.as_deref(), Some("y.png"));
    }

    #[test]
    fn test_id_key_does_not_match_suffix() {
        let text = "const projectsData = [{ videoId: 5, id: 2 }];";
        let records = extract_records(text, "projectsData").unwrap();
        assert_eq!(records[0].id, 2);
    }

    #[test]
    fn test_keys_inside_string_values_are_ignored() {
        let text = r#"const projectsData = [{ judul: "Build id: 9, gambar: 'no.png'", id: 2, gambar: "x.png" }];"#;
        let records = extract_records(text, "projectsData").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[0].gambar.as_deref(), Some("x.png"));
        assert_eq!(records[0].judul.as_deref(), Some("Build id: 9, gambar: 'no.png'"));
    }

    #[test]
    fn test_keys_inside_nested_objects_are_ignored() {
        let text = r#"const projectsData = [{
    meta: { id: 7, gambar: "thumb.png" },
    tags: [{ id: 8 }],
    id: 3,
    gambar: "cover.png",
  }];"#;
        let records = extract_records(text, "projectsData").unwrap();
        assert_eq!(records[0].id, 3);
        assert_eq!(records[0].gambar.as_deref(), Some("cover.png"));
        assert_eq!(records[0].judul, None);
    }

    #[test]
    fn test_record_with_id_only_nested_is_skipped() {
        let text = r#"const projectsData = [{ meta: { id: 5 }, gambar: "x.png" }];"#;
        assert!(extract_records(text, "projectsData").unwrap().is_empty());
    }

    #[test]
    fn test_field_spans_point_into_original_text() {
        let masked = mask_comments(SAMPLE);
        let block = locate_block(SAMPLE, "certificatesData").unwrap();
        let records = locate_records(&masked, &block);

        let quoted = records[0].gambar.as_ref().unwrap();
        assert_eq!(&SAMPLE[quoted.span.clone()], "\"aws.png\"");
        assert_eq!(quoted.quote, Some('"'));

        let bare = records[1].gambar.as_ref().unwrap();
        assert_eq!(&SAMPLE[bare.span.clone()], "oldpic.jpg");
        assert_eq!(bare.quote, None);
    }

    #[test]
    fn test_references() {
        assert!(references(SAMPLE, "aws.png"));
        assert!(references(SAMPLE, "oldpic.jpg"));
        // only mentioned in a comment
        assert!(!references(SAMPLE, "legacy.png"));
        // substring of a longer name
        assert!(!references("gambar: \"data.png\"", "a.png"));
        assert!(!references("gambar: \"a.png.bak\"", "a.png"));
        assert!(references("gambar: \"/img/a.png\"", "a.png"));
    }
}

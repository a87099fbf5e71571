//! Minimal JavaScript lexing helpers
//!
//! The data file is a JavaScript module. We never evaluate it; we only need
//! to tell code apart from comments and strings so that searches and
//! bracket matching ignore commented-out legacy blocks and brackets inside
//! string literals.
//!
//! All helpers work on byte offsets, and `mask_comments` keeps every offset
//! stable so positions found in the masked text can be used to edit the
//! original text.

/// Replace every comment byte with a space (newlines are kept).
///
/// String literals (`'…'`, `"…"`, `` `…` ``) are left alone, so a URL such
/// as `"https://example.com"` is not mistaken for a line comment.
///
/// # Examples
/// ```
/// use portfolio_sync_common::lexer::mask_comments;
///
/// let src = "a: 1, // old\nb: \"http://x\"";
/// let masked = mask_comments(src);
/// assert_eq!(masked.len(), src.len());
/// assert!(!masked.contains("old"));
/// assert!(masked.contains("http://x"));
/// ```
pub fn mask_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            q @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i, q);
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out[i] = b' ';
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = find_block_comment_end(bytes, i + 2);
                for b in &mut out[i..end] {
                    if *b != b'\n' {
                        *b = b' ';
                    }
                }
                i = end;
            }
            _ => i += 1,
        }
    }

    // Comment ranges start and end on ASCII bytes and are blanked whole,
    // so the result is always valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|_| src.to_string())
}

/// Index just past the string literal opened at `start`.
///
/// Backslash escapes are honoured. Single and double quoted strings stop at
/// an unescaped newline (an unterminated literal); template literals may
/// span lines.
pub fn skip_string(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of the line holding `from`, looking through comments.
///
/// `from` must sit in code or whitespace. A trailing `// …` comment belongs
/// to the line; a `/* … */` spanning a newline is stepped over whole.
/// Returns the index of the terminating `\n`, or `None` if `limit` comes
/// first.
pub fn line_end(bytes: &[u8], from: usize, limit: usize) -> Option<usize> {
    let mut i = from;
    while i < limit {
        match bytes[i] {
            b'\n' => return Some(i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = find_block_comment_end(bytes, i + 2),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                return bytes[i..limit].iter().position(|&b| b == b'\n').map(|p| i + p);
            }
            _ => i += 1,
        }
    }
    None
}

fn find_block_comment_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// Find the bracket closing the one at `open`.
///
/// `text` should already be comment-masked. Brackets inside string literals
/// are skipped. Returns `None` if the bracket at `open` is not an opening
/// bracket, if the nesting is inconsistent, or if the input ends first.
pub fn find_matching(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let first = closer_for(*bytes.get(open)?)?;
    let mut stack = vec![first];
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            q @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i, q);
                continue;
            }
            b'(' | b'[' | b'{' => {
                stack.push(closer_for(bytes[i])?);
            }
            b @ (b')' | b']' | b'}') => {
                if stack.pop() != Some(b) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

fn closer_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// Undo backslash escapes in a string literal body
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

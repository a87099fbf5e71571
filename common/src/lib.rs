//! Portfolio Sync Common Library
//!
//! Model of the portfolio data file: record types, a comment-aware lexer,
//! the collection parser and the text-preserving editor.

pub mod types;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod editor;

pub use types::{CertificateRecord, Collection, NewRecord, ProjectRecord, RecordSummary};
pub use error::{DocumentError, Result};
pub use parser::{extract_records, locate_block, references, Block};
pub use editor::{append_record, next_id, render_record, replace_image};

//! Mode B: point an existing record at a different image

use crate::error::{Result, SyncError};
use crate::prompt::Prompter;
use crate::session::Session;
use portfolio_sync_common::{Collection, DocumentError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced {
        collection: Collection,
        id: u32,
        file_name: String,
    },
    /// The branch stopped without touching the data file
    Aborted(String),
}

/// Run Mode B. `collection` skips the collection prompt when given.
pub fn run_replace(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    collection: Option<Collection>,
) -> Result<ReplaceOutcome> {
    let collection = match collection {
        Some(c) => c,
        None => {
            let labels: Vec<&str> = Collection::ALL.iter().map(|c| c.label()).collect();
            Collection::ALL[prompter.select("Which collection?", &labels)?]
        }
    };

    let records = match session.records(collection) {
        Ok(records) if records.is_empty() => {
            let name = session.config.var_name(collection).to_string();
            return Ok(abort(DocumentError::NoRecords(name).to_string()));
        }
        Ok(records) => records,
        Err(SyncError::Document(e)) => return Ok(abort(e.to_string())),
        Err(e) => return Err(e),
    };

    println!("\n📋 {} records:", collection.label());
    for record in &records {
        println!(
            "  #{:<3} {}  [{}]",
            record.id,
            record.judul.as_deref().unwrap_or("(untitled)"),
            record.gambar.as_deref().filter(|g| !g.is_empty()).unwrap_or("(empty)")
        );
    }
    println!();

    let answer = prompter.input("Record ID")?;
    let id = match answer.parse::<u32>() {
        Ok(id) if records.iter().any(|r| r.id == id) => id,
        _ => return Ok(abort(format!("ID not found: {}", answer))),
    };

    let snapshot = session.snapshot()?;
    let candidates: Vec<String> = snapshot
        .selectable(&session.ignore)
        .iter()
        .map(|img| img.file_name.clone())
        .collect();
    if candidates.is_empty() {
        return Ok(abort("No selectable images in the image folder".to_string()));
    }

    println!("\n🖼  Images:");
    for (i, name) in candidates.iter().enumerate() {
        println!("  {}) {}", i + 1, name);
    }
    println!();

    let answer = prompter.input(&format!("Image number [1-{}]", candidates.len()))?;
    let file_name = match answer.parse::<usize>() {
        Ok(n) if (1..=candidates.len()).contains(&n) => candidates[n - 1].clone(),
        _ => return Ok(abort(format!("Invalid selection: {}", answer))),
    };

    match session.replace_image(collection, id, &file_name) {
        Ok(()) => {}
        Err(SyncError::Document(e)) => return Ok(abort(e.to_string())),
        Err(e) => return Err(e),
    }

    println!("✔ {} #{} now uses {}", collection.label(), id, file_name);
    Ok(ReplaceOutcome::Replaced {
        collection,
        id,
        file_name,
    })
}

fn abort(message: String) -> ReplaceOutcome {
    println!("✖ {}", message);
    ReplaceOutcome::Aborted(message)
}

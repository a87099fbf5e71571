//! Synchronizer workflows
//!
//! ## Flow
//! 1. Pick a mode (once per run): scan for new images, or replace an image
//! 2. Run it against the session; edits stay in memory
//! 3. Flush the data file once, only if something changed

pub mod ingest;
pub mod replace;

pub use ingest::{run_ingest, IngestReport};
pub use replace::{run_replace, ReplaceOutcome};

use crate::error::{Result, SyncError};
use crate::prompt::Prompter;
use crate::scanner::ImageStatus;
use crate::session::{Flush, Session};
use portfolio_sync_common::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode A
    Scan,
    /// Mode B, optionally with the collection already chosen
    Replace(Option<Collection>),
}

const MODES: [&str; 2] = ["Scan for new images", "Replace an existing record's image"];

/// Run one mode and flush the session.
///
/// Without `mode` the operator picks one from the menu.
pub fn run(mut session: Session, prompter: &mut dyn Prompter, mode: Option<Mode>) -> Result<Flush> {
    let mode = match mode {
        Some(mode) => mode,
        None => match prompter.select("What do you want to do?", &MODES)? {
            0 => Mode::Scan,
            _ => Mode::Replace(None),
        },
    };

    match mode {
        Mode::Scan => {
            let report = run_ingest(&mut session, prompter)?;
            if report.offered() > 0 {
                println!(
                    "Summary: {} added, {} ignored, {} skipped, {} failed",
                    report.attached.len(),
                    report.ignored.len(),
                    report.skipped.len(),
                    report.failed.len()
                );
            }
        }
        Mode::Replace(collection) => {
            run_replace(&mut session, prompter, collection)?;
        }
    }

    let data_file = session.config.data_file.clone();
    let flush = session.finish()?;
    match flush {
        Flush::Written => println!("\n✔ Saved {}", data_file.display()),
        Flush::DryRun => println!("\n⚠ Dry run: changes were not written to {}", data_file.display()),
        Flush::Unchanged => println!("\n✔ No changes to save"),
    }
    Ok(flush)
}

/// Print the image classification and collection state without writing.
pub fn status(session: &Session) -> Result<()> {
    let snapshot = session.snapshot()?;

    println!("Images in {}:", session.config.image_dir.display());
    println!("  referenced: {}", snapshot.count(ImageStatus::Referenced));
    println!("  ignored:    {}", snapshot.count(ImageStatus::Ignored));
    println!("  new:        {}", snapshot.count(ImageStatus::New));
    for img in snapshot.new_images() {
        println!("    + {}", img.file_name);
    }

    println!("\nCollections in {}:", session.config.data_file.display());
    for collection in Collection::ALL {
        let name = session.config.var_name(collection);
        match session.records(collection) {
            Ok(records) => println!(
                "  ✔ {}: {} record(s), next id {}",
                name,
                records.len(),
                portfolio_sync_common::next_id(&records)
            ),
            Err(SyncError::Document(e)) => println!("  ✖ {}", e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

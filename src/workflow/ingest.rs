//! Mode A: attach new images to records
//!
//! Every image that is neither referenced nor ignored is offered once, in
//! file-name order: certificate, project, ignore, or skip.

use crate::error::{Result, SyncError};
use crate::prompt::Prompter;
use crate::session::Session;
use portfolio_sync_common::{CertificateRecord, Collection, NewRecord, ProjectRecord};

const ACTIONS: [&str; 4] = ["Certificate", "Project", "Ignore (never ask again)", "Skip for now"];

pub const DEFAULT_DESCRIPTION: &str = "Project description coming soon.";
pub const DEFAULT_TECH: [&str; 2] = ["Tech 1", "Tech 2"];
pub const PLACEHOLDER_LINK: &str = "#";

/// What happened to the offered images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// (collection, new id, file name)
    pub attached: Vec<(Collection, u32, String)>,
    pub ignored: Vec<String>,
    pub skipped: Vec<String>,
    /// Attachments aborted by a data-file problem
    pub failed: Vec<String>,
}

impl IngestReport {
    pub fn offered(&self) -> usize {
        self.attached.len() + self.ignored.len() + self.skipped.len() + self.failed.len()
    }
}

pub fn run_ingest(session: &mut Session, prompter: &mut dyn Prompter) -> Result<IngestReport> {
    let snapshot = session.snapshot()?;
    let new_images: Vec<String> = snapshot
        .new_images()
        .iter()
        .map(|img| img.file_name.clone())
        .collect();

    let mut report = IngestReport::default();

    if new_images.is_empty() {
        println!("✔ No new images found");
        return Ok(report);
    }

    println!("📷 {} new image(s) found\n", new_images.len());

    for (i, file_name) in new_images.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, new_images.len(), file_name);

        let choice = prompter.select("Use this image as", &ACTIONS)?;
        match choice {
            0 | 1 => {
                let collection = if choice == 0 {
                    Collection::Certificates
                } else {
                    Collection::Projects
                };
                match attach(session, prompter, collection, file_name) {
                    Ok(id) => {
                        println!("  ✔ {} #{} added: {}\n", collection.label(), id, file_name);
                        report.attached.push((collection, id, file_name.clone()));
                    }
                    Err(SyncError::Document(e)) => {
                        println!("  ✖ {}\n", e);
                        report.failed.push(file_name.clone());
                    }
                    Err(e) => return Err(e),
                }
            }
            2 => {
                session.ignore.add(file_name)?;
                println!("  ✔ Added to ignore list\n");
                report.ignored.push(file_name.clone());
            }
            _ => {
                println!("  → Skipped\n");
                report.skipped.push(file_name.clone());
            }
        }
    }

    Ok(report)
}

/// Prompt for a record's fields and append it. Returns the new id.
fn attach(
    session: &mut Session,
    prompter: &mut dyn Prompter,
    collection: Collection,
    file_name: &str,
) -> Result<u32> {
    // fails before any prompt if the collection block is missing
    let id = session.next_id(collection)?;
    let title = or_default(prompter.input("Title")?, || title_from_file_name(file_name));

    let record = match collection {
        Collection::Certificates => {
            let link = or_default(prompter.input("Certificate link")?, || {
                session.config.default_certificate_link.clone()
            });
            NewRecord::Certificate(CertificateRecord {
                id,
                gambar: file_name.to_string(),
                judul: title,
                link,
            })
        }
        Collection::Projects => {
            let parag = or_default(prompter.input("Description")?, || DEFAULT_DESCRIPTION.to_string());
            let tech = parse_tech(&prompter.input("Tech stack (comma separated)")?);
            let link_demo = or_default(prompter.input("Demo link")?, || PLACEHOLDER_LINK.to_string());
            let link_code = or_default(prompter.input("Code link")?, || PLACEHOLDER_LINK.to_string());
            let coming_soon = prompter.confirm("Coming soon?", false)?;
            NewRecord::Project(ProjectRecord {
                id,
                gambar: file_name.to_string(),
                judul: title,
                parag,
                tech,
                link_demo,
                link_code,
                is_coming_soon: coming_soon.then_some(true),
            })
        }
    };

    session.append(&record)?;
    Ok(id)
}

fn or_default(answer: String, default: impl FnOnce() -> String) -> String {
    if answer.trim().is_empty() {
        default()
    } else {
        answer.trim().to_string()
    }
}

/// Split a comma-separated tech list, falling back to placeholders
pub fn parse_tech(answer: &str) -> Vec<String> {
    let tech: Vec<String> = answer
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if tech.is_empty() {
        DEFAULT_TECH.iter().map(|t| t.to_string()).collect()
    } else {
        tech
    }
}

/// Placeholder title from a file name: `my-cert_2.png` → `My Cert 2`
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = std::path::Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let words: Vec<String> = stem
        .split(['-', '_', ' ', '.'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Untitled".to_string()
    } else {
        words.join(" ")
    }
}

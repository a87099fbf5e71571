//! Ignore list
//!
//! Decorative and background images that must never be offered for a
//! record. Persisted as a JSON array of file names. On first run the list
//! is seeded from the image folder by name pattern and written at once;
//! afterwards it is loaded as-is and only ever grows.

use crate::error::{Result, SyncError};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

lazy_static::lazy_static! {
    // decorative assets: background/illustration prefixes, or site chrome by exact name
    static ref DECORATIVE_PREFIX: Regex =
        Regex::new(r"(?i)^(bg|background|hero|pattern|texture|wave|blob|decor|meow)").unwrap();
    static ref DECORATIVE_NAME: Regex =
        Regex::new(r"(?i)^(logo|favicon|avatar|profile)\.(png|svg|jpe?g)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList {
    path: PathBuf,
    entries: Vec<String>,
}

impl IgnoreList {
    pub fn from_entries(path: PathBuf, entries: Vec<String>) -> Self {
        Self { path, entries }
    }

    /// Load the list at `path`, or seed it from `file_names` and persist it.
    ///
    /// Returns the list and whether it was just bootstrapped.
    pub fn load_or_bootstrap<'a>(
        path: &Path,
        file_names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }

        let entries = file_names
            .into_iter()
            .filter(|name| is_decorative(name))
            .map(str::to_string)
            .collect();
        let list = Self::from_entries(path.to_path_buf(), entries);
        list.save()?;
        info!(path = %path.display(), count = list.len(), "ignore list bootstrapped");

        Ok((list, true))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<String> = serde_json::from_reader(reader)
            .map_err(|e| SyncError::InvalidIgnoreList(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), count = entries.len(), "ignore list loaded");
        Ok(Self::from_entries(path.to_path_buf(), entries))
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.entries)?;
        Ok(())
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.iter().any(|e| e == file_name)
    }

    /// Add `file_name` and persist immediately.
    ///
    /// Returns `false` if it was already listed (nothing is written).
    pub fn add(&mut self, file_name: &str) -> Result<bool> {
        if self.contains(file_name) {
            return Ok(false);
        }
        self.entries.push(file_name.to_string());
        self.save()?;
        debug!(file = file_name, "added to ignore list");
        Ok(true)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether a file name looks like a decorative asset
pub fn is_decorative(file_name: &str) -> bool {
    DECORATIVE_PREFIX.is_match(file_name) || DECORATIVE_NAME.is_match(file_name)
}

//! One synchronizer run
//!
//! Holds the ignore list and the pending data-file text. Record edits only
//! touch the in-memory text; [`Session::finish`] writes the data file once,
//! and only when something changed.

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::ignore::IgnoreList;
use crate::scanner::{self, Snapshot};
use portfolio_sync_common::{
    append_record, extract_records, next_id, replace_image, Collection, NewRecord, RecordSummary,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of [`Session::finish`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// Nothing changed, nothing written
    Unchanged,
    /// Changes were pending but `--dry-run` kept them in memory
    DryRun,
    Written,
}

#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub ignore: IgnoreList,
    data_path: PathBuf,
    source: String,
    mutations: usize,
    dry_run: bool,
}

impl Session {
    pub fn new(config: Config, ignore: IgnoreList, source: String) -> Self {
        let data_path = config.data_file.clone();
        Self {
            config,
            ignore,
            data_path,
            source,
            mutations: 0,
            dry_run: false,
        }
    }

    /// Load the ignore list (bootstrapping it if needed), then the data file.
    pub fn open(config: Config) -> Result<Self> {
        let images = scanner::scan_folder(&config.image_dir, |ext| config.is_supported_extension(ext))?;
        let (ignore, bootstrapped) = IgnoreList::load_or_bootstrap(
            &config.ignore_file,
            images.iter().map(|img| img.file_name.as_str()),
        )?;
        if bootstrapped {
            println!(
                "✔ Created ignore list with {} decorative image(s): {}",
                ignore.len(),
                ignore.path().display()
            );
        }

        if !config.data_file.is_file() {
            return Err(SyncError::FileNotFound(config.data_file.display().to_string()));
        }
        let source = std::fs::read_to_string(&config.data_file)?;

        debug!(data_file = %config.data_file.display(), bytes = source.len(), "data file loaded");
        Ok(Self::new(config, ignore, source))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Current image folder listing, classified against this session
    pub fn snapshot(&self) -> Result<Snapshot> {
        let images = scanner::scan_folder(&self.config.image_dir, |ext| {
            self.config.is_supported_extension(ext)
        })?;
        Ok(Snapshot::classify(images, &self.ignore, &self.source))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_mutated(&self) -> bool {
        self.mutations > 0
    }

    pub fn records(&self, collection: Collection) -> Result<Vec<RecordSummary>> {
        Ok(extract_records(&self.source, self.config.var_name(collection))?)
    }

    pub fn next_id(&self, collection: Collection) -> Result<u32> {
        Ok(next_id(&self.records(collection)?))
    }

    /// Append a record to the pending text
    pub fn append(&mut self, record: &NewRecord) -> Result<()> {
        let name = self.config.var_name(record.collection()).to_string();
        self.source = append_record(&self.source, &name, record)?;
        self.mutations += 1;
        debug!(collection = %record.collection(), id = record.id(), "record appended");
        Ok(())
    }

    /// Point record `id` at `file_name` in the pending text
    pub fn replace_image(&mut self, collection: Collection, id: u32, file_name: &str) -> Result<()> {
        let name = self.config.var_name(collection).to_string();
        self.source = replace_image(&self.source, &name, id, file_name)?;
        self.mutations += 1;
        debug!(collection = %collection, id, file = file_name, "image replaced");
        Ok(())
    }

    /// Write the data file if anything changed.
    pub fn finish(self) -> Result<Flush> {
        if self.mutations == 0 {
            return Ok(Flush::Unchanged);
        }
        if self.dry_run {
            info!(mutations = self.mutations, "dry run, data file left untouched");
            return Ok(Flush::DryRun);
        }

        std::fs::write(&self.data_path, &self.source)?;
        info!(path = %self.data_path.display(), mutations = self.mutations, "data file written");
        Ok(Flush::Written)
    }
}

use crate::error::{Result, SyncError};
use crate::ignore::IgnoreList;
use portfolio_sync_common::references;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// Where an image stands relative to the data file and the ignore list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Named somewhere in the live data file
    Referenced,
    /// Listed in the ignore list
    Ignored,
    /// Neither referenced nor ignored
    New,
}

/// Classified listing of the image folder
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub images: Vec<(ImageInfo, ImageStatus)>,
}

/// List supported images directly under `folder`, sorted by file name.
pub fn scan_folder(folder: &Path, is_supported: impl Fn(&str) -> bool) -> Result<Vec<ImageInfo>> {
    if !folder.is_dir() {
        return Err(SyncError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        // an unreadable folder must not look like an empty one
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        let supported = path
            .extension()
            .map(|ext| is_supported(&ext.to_string_lossy()))
            .unwrap_or(false);
        if !supported {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        images.push(ImageInfo {
            path: path.to_path_buf(),
            file_name,
        });
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!(folder = %folder.display(), count = images.len(), "image folder scanned");

    Ok(images)
}

impl Snapshot {
    /// Classify `images` against the ignore list and the data-file text.
    ///
    /// A file that is both referenced and ignored counts as referenced.
    pub fn classify(images: Vec<ImageInfo>, ignore: &IgnoreList, source: &str) -> Self {
        let images = images
            .into_iter()
            .map(|img| {
                let status = if references(source, &img.file_name) {
                    ImageStatus::Referenced
                } else if ignore.contains(&img.file_name) {
                    ImageStatus::Ignored
                } else {
                    ImageStatus::New
                };
                (img, status)
            })
            .collect();
        Self { images }
    }

    /// New images, each file name at most once
    pub fn new_images(&self) -> Vec<&ImageInfo> {
        let mut seen = BTreeSet::new();
        self.images
            .iter()
            .filter(|(_, status)| *status == ImageStatus::New)
            .map(|(img, _)| img)
            .filter(|img| seen.insert(img.file_name.as_str()))
            .collect()
    }

    /// Images eligible as a replacement: everything not ignored
    pub fn selectable(&self, ignore: &IgnoreList) -> Vec<&ImageInfo> {
        self.images
            .iter()
            .map(|(img, _)| img)
            .filter(|img| !ignore.contains(&img.file_name))
            .collect()
    }

    pub fn count(&self, status: ImageStatus) -> usize {
        self.images.iter().filter(|(_, s)| *s == status).count()
    }
}

use crate::error::{Result, SyncError};
use portfolio_sync_common::Collection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local config file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "sync-images.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Folder holding the portfolio images
    pub image_dir: PathBuf,
    /// JavaScript module holding the record collections
    pub data_file: PathBuf,
    /// Persisted ignore list (JSON array of file names)
    pub ignore_file: PathBuf,
    pub certificates_var: String,
    pub projects_var: String,
    /// Link used when a new certificate is given none
    pub default_certificate_link: String,
    /// Supported image extensions, compared case-insensitively
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("src/assets/images"),
            data_file: PathBuf::from("src/data/data.js"),
            ignore_file: PathBuf::from(".sync-images-ignore.json"),
            certificates_var: "certificatesData".into(),
            projects_var: "projectsData".into(),
            default_certificate_link: "https://www.credly.com/".into(),
            extensions: ["png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load the effective configuration.
    ///
    /// Keys from the global `~/.config/sync-images/config.json` are applied
    /// first, then the project-local `sync-images.json` overrides them key
    /// by key. Keys set in neither file keep their defaults.
    pub fn load() -> Result<Self> {
        let global = Self::global_config_path();
        Self::load_layered(global.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Merge the config files that exist, later layers winning per key
    pub fn load_layered(global: Option<&Path>, local: &Path) -> Result<Self> {
        let mut merged = serde_json::Map::new();
        for path in global.into_iter().chain(std::iter::once(local)) {
            if path.exists() {
                merged.extend(read_layer(path)?);
                debug!(path = %path.display(), "config layer loaded");
            }
        }

        if merged.is_empty() {
            debug!("no config keys found, using defaults");
        }
        serde_json::from_value(Value::Object(merged))
            .map_err(|e| SyncError::Config(format!("{}: {}", local.display(), e)))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let layer = read_layer(path)?;
        let config: Config = serde_json::from_value(Value::Object(layer))
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("sync-images").join("config.json"))
    }

    /// Variable name of a collection in the data file
    pub fn var_name(&self, collection: Collection) -> &str {
        match collection {
            Collection::Certificates => &self.certificates_var,
            Collection::Projects => &self.projects_var,
        }
    }

    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Top-level keys of one config file
fn read_layer(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(SyncError::Config(format!("{}: expected a JSON object", path.display()))),
        Err(e) => Err(SyncError::Config(format!("{}: {}", path.display(), e))),
    }
}

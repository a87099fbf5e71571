//! Record types stored in the portfolio data file
//!
//! Field names follow the keys the portfolio UI reads (`gambar` = image,
//! `judul` = title, `parag` = description).

use serde::{Deserialize, Serialize};

/// The two record collections kept in the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Certificates,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Certificates, Collection::Projects];

    /// Label shown in menus
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Certificates => "Certificate",
            Collection::Projects => "Project",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Certificates => write!(f, "certificates"),
            Collection::Projects => write!(f, "projects"),
        }
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "certificates" | "certificate" | "cert" | "c" => Ok(Collection::Certificates),
            "projects" | "project" | "p" => Ok(Collection::Projects),
            _ => Err(format!("Unknown collection: {}. Use certificates or projects", s)),
        }
    }
}

/// Certificate entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: u32,
    pub gambar: String,
    pub judul: String,
    pub link: String,
}

/// Project entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: u32,
    pub gambar: String,
    pub judul: String,
    pub parag: String,
    pub tech: Vec<String>,
    pub link_demo: String,
    pub link_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_coming_soon: Option<bool>,
}

/// A record about to be appended to its collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRecord {
    Certificate(CertificateRecord),
    Project(ProjectRecord),
}

impl NewRecord {
    pub fn id(&self) -> u32 {
        match self {
            NewRecord::Certificate(r) => r.id,
            NewRecord::Project(r) => r.id,
        }
    }

    pub fn gambar(&self) -> &str {
        match self {
            NewRecord::Certificate(r) => &r.gambar,
            NewRecord::Project(r) => &r.gambar,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            NewRecord::Certificate(_) => Collection::Certificates,
            NewRecord::Project(_) => Collection::Projects,
        }
    }
}

/// What extraction reads back from an existing record.
///
/// Only `id`, `gambar` and `judul` are captured; the other fields stay
/// untouched in the text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSummary {
    pub id: u32,
    pub gambar: Option<String>,
    pub judul: Option<String>,
}

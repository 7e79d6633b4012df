use indexmap::IndexMap;
use serde::Serialize;

/// Raw upstream payload. No key is guaranteed to be present.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Canonical view of a GitHub-shaped repository payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryRecord {
    pub full_name: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub updated: String,
    pub open_issues: u64,
    /// Kilobytes, as reported by GitHub.
    pub size: u64,
    pub license_name: String,
    pub description: String,
    pub default_branch: String,
    pub readme: String,
}

/// Canonical view of a Hugging-Face-shaped model payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRecord {
    pub model_name: String,
    pub author: String,
    pub description: String,
    /// Bytes.
    pub model_size: u64,
    pub downloads: u64,
    pub last_modified: String,
    pub readme: String,
    pub license_name: String,
    pub tags: Vec<String>,
    pub task: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LicenseRisk {
    Permissive,
    WeakCopyleft,
    StrongCopyleft,
    Proprietary,
    Unknown,
}

impl std::fmt::Display for LicenseRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseRisk::Permissive => write!(f, "Permissive"),
            LicenseRisk::WeakCopyleft => write!(f, "Weak Copyleft"),
            LicenseRisk::StrongCopyleft => write!(f, "Strong Copyleft"),
            LicenseRisk::Proprietary => write!(f, "Proprietary"),
            LicenseRisk::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Which upstream a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    GitHub,
    HuggingFace,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::GitHub => write!(f, "GitHub"),
            Source::HuggingFace => write!(f, "Hugging Face"),
        }
    }
}

/// Metric name to score, in the order the scorer produced them.
pub type ScoreBreakdown = IndexMap<String, f64>;

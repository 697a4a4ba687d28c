use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Duration of the videos found directly inside one folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderSummary {
    pub path: PathBuf,
    pub name: String,
    pub minutes: f64,
}

impl FolderSummary {
    #[must_use]
    pub fn new(path: PathBuf, name: impl Into<String>, minutes: f64) -> Self {
        Self {
            path,
            name: name.into(),
            minutes: minutes.max(0.0),
        }
    }
}

/// Result of walking one directory tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanOutcome {
    /// Folders in the order they were visited.
    pub summaries: Vec<FolderSummary>,
    pub total_seconds: f64,
    pub total_videos: usize,
    pub cancelled: bool,
}

impl ScanOutcome {
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.total_seconds / 3600.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

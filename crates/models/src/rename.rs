use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One folder rename that actually happened on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenameEntry {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
    pub old_name: String,
    pub new_name: String,
    pub renamed_at: DateTime<Local>,
}

impl RenameEntry {
    #[must_use]
    pub fn new(old_path: PathBuf, new_path: PathBuf, old_name: String, new_name: String) -> Self {
        Self {
            old_path,
            new_path,
            old_name,
            new_name,
            renamed_at: Local::now(),
        }
    }
}

/// In-memory log of renames, oldest first.
///
/// This is the only record of what was renamed; it is not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenameHistory {
    entries: Vec<RenameEntry>,
}

impl RenameHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RenameEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }

    /// Removes every entry, yielding the most recent rename first.
    pub fn drain_newest_first(&mut self) -> impl Iterator<Item = RenameEntry> + '_ {
        self.entries.drain(..).rev()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameCounts {
    pub renamed: usize,
    pub skipped: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevertCounts {
    pub reverted: usize,
    pub skipped: usize,
    pub errors: usize,
}

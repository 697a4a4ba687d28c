use std::fmt;
use std::path::PathBuf;

use crate::rename::{RenameCounts, RevertCounts};
use crate::summary::FolderSummary;

/// Outcome class of an [`Event`], used by front-ends to pick a glyph and style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Info,
    Success,
    Skipped,
    Warning,
    Error,
}

impl Status {
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Info => "•",
            Self::Success => "✓",
            Self::Skipped => "⏭",
            Self::Warning => "⚠",
            Self::Error => "❌",
        }
    }
}

/// Progress notification emitted while scanning, renaming or reverting.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ScanStarted { root: PathBuf },
    FolderStarted { path: PathBuf },
    FileProbed { file_name: String, seconds: f64 },
    ProbeTimedOut { file: PathBuf },
    ProbeFailed { file: PathBuf, reason: String },
    ProberMissing { program: PathBuf },
    FolderListingFailed { path: PathBuf, reason: String },
    FolderFinished { path: PathBuf, video_count: usize, seconds: f64 },
    ScanCancelled,
    ScanReport { summaries: Vec<FolderSummary>, total_seconds: f64 },

    RenameStarted { folders: usize },
    Renamed { old_name: String, new_name: String },
    RenameSkipped { name: String },
    RenameFailed { name: String, reason: String },
    RenameFinished { counts: RenameCounts },

    RevertStarted { entries: usize },
    Reverted { new_name: String, old_name: String },
    RevertSkipped { name: String },
    RevertMissing { name: String },
    RevertFailed { name: String, reason: String },
    RevertFinished { counts: RevertCounts },
}

impl Event {
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::FileProbed { .. } | Self::Renamed { .. } | Self::Reverted { .. } => Status::Success,
            Self::RenameSkipped { .. } | Self::RevertSkipped { .. } => Status::Skipped,
            Self::ProbeTimedOut { .. }
            | Self::ProbeFailed { .. }
            | Self::FolderListingFailed { .. }
            | Self::ScanCancelled
            | Self::RevertMissing { .. } => Status::Warning,
            Self::ProberMissing { .. } | Self::RenameFailed { .. } | Self::RevertFailed { .. } => Status::Error,
            Self::ScanStarted { .. }
            | Self::FolderStarted { .. }
            | Self::FolderFinished { .. }
            | Self::ScanReport { .. }
            | Self::RenameStarted { .. }
            | Self::RenameFinished { .. }
            | Self::RevertStarted { .. }
            | Self::RevertFinished { .. } => Status::Info,
        }
    }
}

fn file_name(path: &std::path::Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScanStarted { root } => write!(f, "Scanning {}", root.display()),
            Self::FolderStarted { path } => write!(f, "Folder {}", path.display()),
            Self::FileProbed { file_name, seconds } => write!(f, "{file_name}: {:.2} min", seconds / 60.0),
            Self::ProbeTimedOut { file } => write!(f, "Timeout processing {}", file_name(file)),
            Self::ProbeFailed { file, reason } => write!(f, "Error processing {}: {reason}", file_name(file)),
            Self::ProberMissing { program } => write!(f, "{} not found", program.display()),
            Self::FolderListingFailed { path, reason } => {
                write!(f, "Error scanning folder {}: {reason}", path.display())
            }
            Self::FolderFinished {
                path,
                video_count,
                seconds,
            } => write!(
                f,
                "{}: {video_count} videos, {:.2} min",
                path.display(),
                seconds / 60.0
            ),
            Self::ScanCancelled => write!(f, "Processing stopped by user"),
            Self::ScanReport {
                summaries,
                total_seconds,
            } => write!(
                f,
                "{} folders, total {:.2} min ({:.2} hours)",
                summaries.len(),
                total_seconds / 60.0,
                total_seconds / 3600.0
            ),
            Self::RenameStarted { folders } => write!(f, "Renaming {folders} folders"),
            Self::Renamed { old_name, new_name } => write!(f, "Renamed: {old_name} → {new_name}"),
            Self::RenameSkipped { name } => write!(f, "Skipped (already has duration): {name}"),
            Self::RenameFailed { name, reason } => write!(f, "Error renaming {name}: {reason}"),
            Self::RenameFinished { counts } => write!(
                f,
                "Renamed {}, skipped {}, errors {}",
                counts.renamed, counts.skipped, counts.errors
            ),
            Self::RevertStarted { entries } => write!(f, "Reverting {entries} renames"),
            Self::Reverted { new_name, old_name } => write!(f, "Reverted: {new_name} → {old_name}"),
            Self::RevertSkipped { name } => write!(f, "Skipped (original exists): {name}"),
            Self::RevertMissing { name } => write!(f, "Missing: {name} (cannot revert)"),
            Self::RevertFailed { name, reason } => write!(f, "Error reverting {name}: {reason}"),
            Self::RevertFinished { counts } => write!(
                f,
                "Reverted {}, skipped {}, errors {}",
                counts.reverted, counts.skipped, counts.errors
            ),
        }
    }
}

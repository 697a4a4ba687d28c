mod event;
mod rename;
mod summary;

pub use event::{Event, Status};
pub use rename::{RenameCounts, RenameEntry, RenameHistory, RevertCounts};
pub use summary::{FolderSummary, ScanOutcome};

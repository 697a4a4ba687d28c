use std::fs;
use tracing::{info, warn};
use vidtally_models::{Event, RenameHistory, RevertCounts};

use crate::events::EventSink;

/// Undoes recorded renames, newest first, and empties `history`.
///
/// An entry is only reverted when its renamed folder exists and its original
/// name is free. If the original already exists it is left alone and counted
/// as skipped; if neither exists the entry is counted as an error.
pub fn revert_renames(history: &mut RenameHistory, events: &dyn EventSink) -> RevertCounts {
    info!("Reverter: Reverting {} renames", history.len());
    events.emit(Event::RevertStarted {
        entries: history.len(),
    });

    let mut counts = RevertCounts::default();

    for entry in history.drain_newest_first() {
        if entry.new_path.exists() && !entry.old_path.exists() {
            match fs::rename(&entry.new_path, &entry.old_path) {
                Ok(()) => {
                    info!("Reverter: {:?} -> {:?}", entry.new_path, entry.old_path);
                    events.emit(Event::Reverted {
                        new_name: entry.new_name,
                        old_name: entry.old_name,
                    });
                    counts.reverted += 1;
                }
                Err(e) => {
                    warn!("Reverter: Failed to revert {:?}: {}", entry.new_path, e);
                    events.emit(Event::RevertFailed {
                        name: entry.new_name,
                        reason: e.to_string(),
                    });
                    counts.errors += 1;
                }
            }
        } else if entry.old_path.exists() {
            info!("Reverter: {:?} already exists, leaving it", entry.old_path);
            events.emit(Event::RevertSkipped { name: entry.old_name });
            counts.skipped += 1;
        } else {
            warn!("Reverter: {:?} is missing, cannot revert", entry.new_path);
            events.emit(Event::RevertMissing { name: entry.new_name });
            counts.errors += 1;
        }
    }

    info!(
        "Reverter: reverted {}, skipped {}, errors {}",
        counts.reverted, counts.skipped, counts.errors
    );
    events.emit(Event::RevertFinished { counts });
    counts
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::events::EventLog;
    use color_eyre::Result;
    use std::path::Path;
    use tempfile::TempDir;
    use vidtally_models::RenameEntry;

    fn record(history: &mut RenameHistory, parent: &Path, old_name: &str, new_name: &str) {
        history.push(RenameEntry::new(
            parent.join(old_name),
            parent.join(new_name),
            old_name.to_string(),
            new_name.to_string(),
        ));
    }

    #[test]
    fn test_revert_restores_original_name() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::create_dir(root.join("A (2 min)"))?;

        let mut history = RenameHistory::new();
        record(&mut history, root, "A", "A (2 min)");

        let counts = revert_renames(&mut history, &EventLog::new());

        assert_eq!(
            counts,
            RevertCounts {
                reverted: 1,
                skipped: 0,
                errors: 0
            }
        );
        assert!(root.join("A").is_dir());
        assert!(!root.join("A (2 min)").exists());
        assert!(history.is_empty());

        let again = revert_renames(&mut history, &EventLog::new());
        assert_eq!(again, RevertCounts::default());
        Ok(())
    }

    #[test]
    fn test_existing_original_is_skipped() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::create_dir(root.join("A"))?;
        fs::create_dir(root.join("A (2 min)"))?;

        let mut history = RenameHistory::new();
        record(&mut history, root, "A", "A (2 min)");

        let log = EventLog::new();
        let counts = revert_renames(&mut history, &log);

        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.reverted, 0);
        assert!(root.join("A (2 min)").is_dir());
        assert!(log.snapshot().contains(&Event::RevertSkipped { name: "A".into() }));
        Ok(())
    }

    #[test]
    fn test_missing_entry_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let mut history = RenameHistory::new();
        record(&mut history, temp_dir.path(), "A", "A (2 min)");

        let log = EventLog::new();
        let counts = revert_renames(&mut history, &log);

        assert_eq!(counts.errors, 1);
        assert!(history.is_empty());
        assert!(log.snapshot().contains(&Event::RevertMissing {
            name: "A (2 min)".into()
        }));
        Ok(())
    }

    #[test]
    fn test_nested_entries_unwind_in_reverse() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("A (2 min)/C (10 min)"))?;

        let mut history = RenameHistory::new();
        record(&mut history, root, "A", "A (2 min)");
        record(&mut history, &root.join("A (2 min)"), "C", "C (10 min)");

        let counts = revert_renames(&mut history, &EventLog::new());

        assert_eq!(counts.reverted, 2);
        assert_eq!(counts.errors, 0);
        assert!(root.join("A/C").is_dir());
        Ok(())
    }
}

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};
use vidtally_models::{Event, FolderSummary, RenameCounts, RenameEntry, RenameHistory};
use vidtally_utils::duration::rounded_minutes;
use vidtally_utils::rebase;

use crate::events::EventSink;

#[allow(clippy::expect_used)]
static DURATION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+(\.\d+)?\s*min\)").expect("Failed to compile DURATION_SUFFIX regex"));

/// Whether `name` already carries a `(N min)` / `(N.M min)` tag anywhere.
#[must_use]
pub fn has_duration_suffix(name: &str) -> bool {
    DURATION_SUFFIX.is_match(name)
}

/// `"Intro"` and `32.6` give `"Intro (33 min)"`.
#[must_use]
pub fn suffixed_name(name: &str, minutes: f64) -> String {
    format!("{name} ({} min)", rounded_minutes(minutes))
}

/// Appends each folder's duration to its name, in the order given.
///
/// Folders that already carry a duration tag are skipped. Failures are counted
/// and reported, never returned. Only renames that happened on disk are
/// recorded in the returned history.
pub fn rename_with_duration(summaries: &[FolderSummary], events: &dyn EventSink) -> (RenameHistory, RenameCounts) {
    info!("Renamer: Renaming up to {} folders", summaries.len());
    events.emit(Event::RenameStarted {
        folders: summaries.len(),
    });

    let mut history = RenameHistory::new();
    let mut counts = RenameCounts::default();

    for summary in summaries {
        if has_duration_suffix(&summary.name) {
            info!("Renamer: Skipping {:?}, already has a duration", summary.name);
            events.emit(Event::RenameSkipped {
                name: summary.name.clone(),
            });
            counts.skipped += 1;
            continue;
        }

        let new_name = suffixed_name(&summary.name, summary.minutes);
        let old_path = current_path(&summary.path, &history);

        match rename_folder(&old_path, &new_name) {
            Ok(new_path) => {
                info!("Renamer: {:?} -> {:?}", old_path, new_path);
                events.emit(Event::Renamed {
                    old_name: summary.name.clone(),
                    new_name: new_name.clone(),
                });
                history.push(RenameEntry::new(old_path, new_path, summary.name.clone(), new_name));
                counts.renamed += 1;
            }
            Err(e) => {
                warn!("Renamer: Failed to rename {:?}: {}", old_path, e);
                events.emit(Event::RenameFailed {
                    name: summary.name.clone(),
                    reason: e.to_string(),
                });
                counts.errors += 1;
            }
        }
    }

    info!(
        "Renamer: renamed {}, skipped {}, errors {}",
        counts.renamed, counts.skipped, counts.errors
    );
    events.emit(Event::RenameFinished { counts });
    (history, counts)
}

/// Where `path` lives now, given the folders already renamed in this run.
fn current_path(path: &Path, history: &RenameHistory) -> PathBuf {
    history.entries().iter().fold(path.to_path_buf(), |current, entry| {
        rebase(&current, &entry.old_path, &entry.new_path).unwrap_or(current)
    })
}

fn rename_folder(old_path: &Path, new_name: &str) -> io::Result<PathBuf> {
    let parent = old_path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "folder has no parent directory"))?;
    let new_path = parent.join(new_name);

    if new_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", new_path.display()),
        ));
    }

    fs::rename(old_path, &new_path)?;
    Ok(new_path)
}

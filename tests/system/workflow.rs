#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)] // For comparing floats in tests
#![allow(clippy::panic)]
use async_trait::async_trait;
use color_eyre::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;

use vidtally_core::{
    CancelToken, DurationProbe, DurationScanner, EventLog, ProbeError, rename_with_duration, revert_renames,
};
use vidtally_models::{Event, RevertCounts};
use vidtally_utils::VideoExtensions;

/// Every directory below `root`, relative to it.
fn list_dirs(root: &Path) -> BTreeSet<PathBuf> {
    let mut found = BTreeSet::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                found.insert(path.strip_prefix(root).unwrap().to_path_buf());
                pending.push(path);
            }
        }
    }
    found
}

/// Treats each file's contents as its duration in seconds.
struct ContentProbe;

#[async_trait]
impl DurationProbe for ContentProbe {
    async fn probe(&self, file: &Path) -> std::result::Result<f64, ProbeError> {
        let text = fs::read_to_string(file).await?;
        text.trim()
            .parse()
            .map_err(|_| ProbeError::Malformed(text.clone()))
    }
}

async fn create_video(path: &Path, seconds: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, seconds).await?;
    Ok(())
}

/// A course laid out the way people usually keep them.
async fn setup_course(root: &Path) -> Result<()> {
    create_video(&root.join("01. Introduction/welcome.mp4"), "95").await?;
    create_video(&root.join("01. Introduction/overview.mp4"), "1865").await?;
    create_video(&root.join("02. Basics/lesson1.mkv"), "600").await?;
    create_video(&root.join("02. Basics/Exercises/ex1.mp4"), "300").await?;
    create_video(&root.join("02. Basics/Exercises/broken.mp4"), "not a video").await?;
    create_video(&root.join("03. Extras (45 min)/bonus.mp4"), "2700").await?;
    fs::create_dir_all(root.join("Resources/Slides")).await?;
    fs::write(root.join("Resources/Slides/deck.pdf"), "pdf").await?;
    Ok(())
}

fn scanner() -> DurationScanner<ContentProbe> {
    DurationScanner::new(ContentProbe, VideoExtensions::parse(".mp4,.mkv").unwrap())
}

#[tokio::test]
async fn test_scan_rename_revert_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    setup_course(root).await?;
    let original_dirs = list_dirs(root);

    let log = EventLog::new();
    let outcome = scanner().scan(root, &CancelToken::new(), &log).await?;

    let names: Vec<&str> = outcome.summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["01. Introduction", "02. Basics", "Exercises", "03. Extras (45 min)"]
    );
    assert_eq!(outcome.total_videos, 6);
    assert_eq!(outcome.total_seconds, 95.0 + 1865.0 + 600.0 + 300.0 + 2700.0);
    let scan_events = log.take();
    assert!(
        scan_events
            .iter()
            .any(|e| matches!(e, Event::ProbeFailed { file, .. } if file.ends_with("broken.mp4")))
    );

    let (mut history, counts) = rename_with_duration(&outcome.summaries, &log);
    let rename_events = log.take();
    assert_eq!(
        rename_events
            .iter()
            .filter(|e| matches!(e, Event::Renamed { .. }))
            .count(),
        3
    );
    assert!(matches!(rename_events.last(), Some(Event::RenameFinished { .. })));
    assert_eq!(counts.renamed, 3);
    assert_eq!(counts.skipped, 1);
    assert_eq!(counts.errors, 0);
    assert!(root.join("01. Introduction (33 min)").is_dir());
    assert!(root.join("02. Basics (10 min)/Exercises (5 min)").is_dir());
    assert!(root.join("03. Extras (45 min)").is_dir());

    let reverted = revert_renames(&mut history, &log);
    assert_eq!(
        reverted,
        RevertCounts {
            reverted: 3,
            skipped: 0,
            errors: 0
        }
    );
    assert_eq!(list_dirs(root), original_dirs);
    Ok(())
}

#[tokio::test]
async fn test_second_rename_pass_skips_everything() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    setup_course(root).await?;

    let first = scanner().scan(root, &CancelToken::new(), &EventLog::new()).await?;
    let (_history, counts) = rename_with_duration(&first.summaries, &EventLog::new());
    assert_eq!(counts.renamed, 3);
    let renamed_dirs = list_dirs(root);

    let second = scanner().scan(root, &CancelToken::new(), &EventLog::new()).await?;
    assert_eq!(second.total_seconds, first.total_seconds);
    let (history, counts) = rename_with_duration(&second.summaries, &EventLog::new());

    assert_eq!(counts.renamed, 0);
    assert_eq!(counts.skipped, second.summaries.len());
    assert!(history.is_empty());
    assert_eq!(list_dirs(root), renamed_dirs);
    Ok(())
}

#[tokio::test]
async fn test_revert_tolerates_outside_changes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    setup_course(root).await?;

    let outcome = scanner().scan(root, &CancelToken::new(), &EventLog::new()).await?;
    let (mut history, _) = rename_with_duration(&outcome.summaries, &EventLog::new());

    // someone recreates one original name and moves another folder away
    fs::create_dir(root.join("01. Introduction")).await?;
    fs::rename(root.join("02. Basics (10 min)"), root.join("moved")).await?;

    let counts = revert_renames(&mut history, &EventLog::new());

    assert_eq!(counts.skipped, 1);
    // "Exercises" and "02. Basics" both vanished with the move
    assert_eq!(counts.errors, 2);
    assert_eq!(counts.reverted, 0);
    assert!(history.is_empty());

    let dirs: BTreeSet<PathBuf> = list_dirs(root);
    assert!(dirs.contains(Path::new("01. Introduction (33 min)")));
    assert!(dirs.contains(Path::new("moved/Exercises (5 min)")));
    Ok(())
}

#![cfg(unix)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)] // For comparing floats in tests
use color_eyre::Result;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::fs;

use vidtally_core::{CancelToken, DurationScanner, Error, EventLog, FfprobeProber};
use vidtally_models::Event;
use vidtally_utils::VideoExtensions;

/// Stand-in for ffprobe: the media file holds its own duration, "hang" sleeps, "fail" exits 1.
const FAKE_FFPROBE: &str = r#"#!/bin/sh
for last; do :; done
content=$(cat "$last")
case "$content" in
  hang) exec sleep 5 ;;
  fail) echo "Invalid data found when processing input" >&2; exit 1 ;;
esac
printf '{"format":{"duration":"%s"}}' "$content"
"#;

async fn install_fake_ffprobe(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("ffprobe");
    fs::write(&path, FAKE_FFPROBE).await?;
    fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).await?;
    Ok(path)
}

async fn create_video(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await?;
    Ok(())
}

#[tokio::test]
async fn test_scan_with_ffprobe_stand_in() -> Result<()> {
    let tools = TempDir::new()?;
    let ffprobe = install_fake_ffprobe(tools.path()).await?;

    let library = TempDir::new()?;
    let root = library.path();
    create_video(&root.join("A/one.mp4"), "30.5").await?;
    create_video(&root.join("A/two.mp4"), "89.5").await?;
    create_video(&root.join("A/C/long.mp4"), "600").await?;
    create_video(&root.join("A/C/bad.mp4"), "fail").await?;
    create_video(&root.join("B/slow.mp4"), "hang").await?;

    let prober = FfprobeProber::new(ffprobe, Duration::from_millis(500));
    let scanner = DurationScanner::new(prober, VideoExtensions::default());
    let log = EventLog::new();

    let outcome = scanner.scan(root, &CancelToken::new(), &log).await?;

    let names: Vec<&str> = outcome.summaries.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["A", "C", "B"]);
    assert_eq!(outcome.summaries[0].minutes, 2.0);
    assert_eq!(outcome.summaries[1].minutes, 10.0);
    assert_eq!(outcome.summaries[2].minutes, 0.0);
    assert_eq!(outcome.total_seconds, 720.0);
    assert_eq!(outcome.total_videos, 5);

    let events = log.snapshot();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::ProbeTimedOut { file } if file.ends_with("slow.mp4")))
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::ProbeFailed { file, .. } if file.ends_with("bad.mp4")))
    );
    Ok(())
}

#[tokio::test]
async fn test_scan_without_ffprobe_fails() -> Result<()> {
    let library = TempDir::new()?;
    create_video(&library.path().join("A/one.mp4"), "30").await?;

    let prober = FfprobeProber::new("/nonexistent/vidtally/ffprobe", Duration::from_secs(1));
    let scanner = DurationScanner::new(prober, VideoExtensions::default());
    let log = EventLog::new();

    let result = scanner.scan(library.path(), &CancelToken::new(), &log).await;

    assert!(matches!(result, Err(Error::ProberNotFound { .. })));
    assert!(log.snapshot().iter().any(|e| matches!(e, Event::ProberMissing { .. })));
    Ok(())
}

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vidtally_models::{Event, FolderSummary, ScanOutcome};
use vidtally_utils::VideoExtensions;
use vidtally_utils::display_name;
use vidtally_utils::duration::seconds_to_minutes;
use walkdir::WalkDir;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::events::EventSink;
use crate::prober::{DurationProbe, probe_duration};

/// Sum of the video durations found directly inside one folder.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FolderTotals {
    pub seconds: f64,
    pub video_count: usize,
}

/// Walks directory trees and adds up video durations per folder.
#[derive(Debug, Clone)]
pub struct DurationScanner<P> {
    probe: P,
    extensions: VideoExtensions,
}

impl<P: DurationProbe> DurationScanner<P> {
    #[must_use]
    pub fn new(probe: P, extensions: VideoExtensions) -> Self {
        Self { probe, extensions }
    }

    #[must_use]
    pub fn extensions(&self) -> &VideoExtensions {
        &self.extensions
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Sums the durations of the matching files directly inside `folder`.
    ///
    /// Subfolders are not descended into. If `cancel` fires between files, the
    /// partial total is returned. A folder that cannot be listed yields zero.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ProberNotFound`] if the prober executable is missing.
    pub async fn aggregate_folder(
        &self,
        folder: &Path,
        cancel: &CancelToken,
        events: &dyn EventSink,
    ) -> Result<FolderTotals> {
        match self.video_files(folder).await {
            Ok(files) => self.sum_files(&files, cancel, events).await,
            Err(e) => {
                Self::listing_failed(folder, &e, events);
                Ok(FolderTotals::default())
            }
        }
    }

    /// Walks `root` in pre-order and summarizes every folder that directly holds videos.
    ///
    /// Folders without videos of their own produce no summary but are still
    /// walked into. Summaries come back in visiting order, which is also the
    /// order they should be renamed in.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ProberNotFound`] if the prober executable is missing.
    pub async fn scan(&self, root: &Path, cancel: &CancelToken, events: &dyn EventSink) -> Result<ScanOutcome> {
        info!(
            "Scanner: Starting scan of {:?} for {} extensions ({})",
            root,
            self.extensions.len(),
            self.extensions
        );
        events.emit(Event::ScanStarted {
            root: root.to_path_buf(),
        });

        let mut outcome = ScanOutcome::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            if cancel.is_cancelled() {
                return Ok(Self::cancelled(outcome, events));
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!("Scanner: Cannot read {:?}: {}", path, e);
                    events.emit(Event::FolderListingFailed {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let folder = entry.path();
            let files = match self.video_files(folder).await {
                Ok(files) => files,
                Err(e) => {
                    Self::listing_failed(folder, &e, events);
                    continue;
                }
            };
            if files.is_empty() {
                debug!("Scanner: No videos directly in {:?}", folder);
                continue;
            }

            events.emit(Event::FolderStarted {
                path: folder.to_path_buf(),
            });
            let totals = self.sum_files(&files, cancel, events).await?;

            // aggregation may have stopped part-way through the folder
            if cancel.is_cancelled() {
                return Ok(Self::cancelled(outcome, events));
            }

            outcome.total_videos += totals.video_count;
            outcome.total_seconds += totals.seconds;
            events.emit(Event::FolderFinished {
                path: folder.to_path_buf(),
                video_count: totals.video_count,
                seconds: totals.seconds,
            });
            outcome.summaries.push(FolderSummary::new(
                folder.to_path_buf(),
                display_name(folder),
                seconds_to_minutes(totals.seconds),
            ));
        }

        if cancel.is_cancelled() {
            return Ok(Self::cancelled(outcome, events));
        }

        info!(
            "Scanner: {} folders, {} videos, {:.2}s total",
            outcome.summaries.len(),
            outcome.total_videos,
            outcome.total_seconds
        );
        events.emit(Event::ScanReport {
            summaries: outcome.summaries.clone(),
            total_seconds: outcome.total_seconds,
        });
        Ok(outcome)
    }

    async fn sum_files(&self, files: &[PathBuf], cancel: &CancelToken, events: &dyn EventSink) -> Result<FolderTotals> {
        let mut totals = FolderTotals::default();

        for file in files {
            if cancel.is_cancelled() {
                debug!("Scanner: Cancelled after {} files", totals.video_count);
                return Ok(totals);
            }

            let seconds = probe_duration(&self.probe, file, events).await?;
            totals.seconds += seconds;
            totals.video_count += 1;
            events.emit(Event::FileProbed {
                file_name: display_name(file),
                seconds,
            });
        }

        Ok(totals)
    }

    /// Matching regular files directly inside `folder`, sorted by path.
    async fn video_files(&self, folder: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(folder).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !self.extensions.matches(&path) {
                continue;
            }
            // follows symlinks, so a link to a video counts as a video
            if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn listing_failed(folder: &Path, error: &io::Error, events: &dyn EventSink) {
        warn!("Scanner: Error scanning folder {:?}: {}", folder, error);
        events.emit(Event::FolderListingFailed {
            path: folder.to_path_buf(),
            reason: error.to_string(),
        });
    }

    fn cancelled(outcome: ScanOutcome, events: &dyn EventSink) -> ScanOutcome {
        info!(
            "Scanner: Stopped by user after {} folders",
            outcome.summaries.len()
        );
        events.emit(Event::ScanCancelled);
        ScanOutcome {
            cancelled: true,
            ..outcome
        }
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, warn};
use vidtally_models::Event;

use crate::error::{Error, ProbeError, Result};
use crate::events::EventSink;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Obtains the playback duration of a single media file, in seconds.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, file: &Path) -> Result<f64, ProbeError>;
}

/// Runs `ffprobe` once per file and reads `format.duration` from its JSON output.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
    timeout: Duration,
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe", Self::DEFAULT_TIMEOUT)
    }
}

impl FfprobeProber {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self, file: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);
        command
    }
}

#[async_trait]
impl DurationProbe for FfprobeProber {
    async fn probe(&self, file: &Path) -> Result<f64, ProbeError> {
        let mut command = self.command(file);

        let Ok(output) = tokio::time::timeout(self.timeout, command.output()).await else {
            return Err(ProbeError::Timeout(self.timeout));
        };
        let output = output.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProbeError::NotFound {
                    program: self.program.clone(),
                }
            } else {
                ProbeError::Io(e)
            }
        })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_ffprobe_output(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeReport {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    // ffprobe prints numbers as JSON strings, e.g. "123.456000"
    duration: Option<serde_json::Value>,
}

/// Extracts `format.duration` from `ffprobe -of json` output.
///
/// # Errors
///
/// Returns [`ProbeError::Malformed`] if the output is not JSON, lacks the field,
/// or holds a value that is not a finite, non-negative number.
pub fn parse_ffprobe_output(stdout: &[u8]) -> Result<f64, ProbeError> {
    let report: FfprobeReport =
        serde_json::from_slice(stdout).map_err(|e| ProbeError::Malformed(e.to_string()))?;

    let value = report
        .format
        .and_then(|format| format.duration)
        .ok_or_else(|| ProbeError::Malformed("missing format.duration".to_string()))?;

    let seconds = match &value {
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        serde_json::Value::Number(number) => number.as_f64(),
        _ => None,
    }
    .ok_or_else(|| ProbeError::Malformed(format!("duration is not a number: {value}")))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(ProbeError::Malformed(format!("duration out of range: {seconds}")));
    }
    Ok(seconds)
}

/// Probes `file`, turning every recoverable failure into a zero duration.
///
/// Only a missing prober executable is returned as an error, since every later
/// probe would fail the same way.
///
/// # Errors
///
/// Returns [`Error::ProberNotFound`] if the prober executable cannot be started.
pub async fn probe_duration<P>(probe: &P, file: &Path, events: &dyn EventSink) -> Result<f64>
where
    P: DurationProbe + ?Sized,
{
    match probe.probe(file).await {
        Ok(seconds) => {
            debug!("Probed {:?}: {:.2}s", file, seconds);
            Ok(seconds)
        }
        Err(ProbeError::NotFound { program }) => {
            error!("Prober {:?} not found", program);
            events.emit(Event::ProberMissing {
                program: program.clone(),
            });
            Err(Error::ProberNotFound { program })
        }
        Err(ProbeError::Timeout(limit)) => {
            warn!("Probe of {:?} timed out after {:?}", file, limit);
            events.emit(Event::ProbeTimedOut {
                file: file.to_path_buf(),
            });
            Ok(0.0)
        }
        Err(e) => {
            warn!("Probe of {:?} failed: {}", file, e);
            events.emit(Event::ProbeFailed {
                file: file.to_path_buf(),
                reason: e.to_string(),
            });
            Ok(0.0)
        }
    }
}

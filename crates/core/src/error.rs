use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// Failures that stop a whole run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("media prober {} not found; install FFmpeg to provide it", .program.display())]
    ProberNotFound { program: PathBuf },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single probe invocation.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("{} not found", .program.display())]
    NotFound { program: PathBuf },
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("prober exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("unexpected prober output: {0}")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

mod cancel;
mod error;
mod events;
mod prober;
mod renamer;
mod reverter;
mod scanner;

pub use cancel::CancelToken;
pub use error::{Error, ProbeError, Result};
pub use events::{EventLog, EventSink, TracingSink};
pub use prober::{DurationProbe, FfprobeProber, parse_ffprobe_output, probe_duration};
pub use renamer::{has_duration_suffix, rename_with_duration, suffixed_name};
pub use reverter::revert_renames;
pub use scanner::{DurationScanner, FolderTotals};

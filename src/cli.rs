use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;
use vidtally_config::Settings;
use vidtally_utils::VideoExtensions;

/// Sum video playback time per folder and optionally tag folders with it.
#[derive(Debug, Parser)]
#[command(name = "vidtally", version, about)]
pub struct Cli {
    /// Folder to scan
    pub folder: PathBuf,

    /// Comma separated video extensions, e.g. ".mp4, .mkv"
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Seconds to wait for each probe before giving up on the file
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Path of the ffprobe executable
    #[arg(long)]
    pub ffprobe: Option<PathBuf>,

    /// Append "(N min)" to every summarized folder after the scan
    #[arg(short, long)]
    pub rename: bool,

    /// Rename without asking for confirmation
    #[arg(short, long, requires = "rename")]
    pub yes: bool,

    /// Print the results as JSON instead of the styled report
    #[arg(long)]
    pub json: bool,

    /// Settings file to use instead of the per-user config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store the effective settings back to the settings file
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Overrides loaded settings with the values given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if `--ext` holds no usable extension.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(list) = &self.ext {
            let extensions = VideoExtensions::parse(list)?;
            settings.video_extensions = extensions.as_slice().to_vec();
        }
        if let Some(timeout) = self.timeout {
            settings.probe_timeout_secs = timeout;
        }
        if let Some(program) = &self.ffprobe {
            settings.ffprobe_path.clone_from(program);
        }
        Ok(())
    }
}

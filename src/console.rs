use color_eyre::eyre::Result;
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, StyledContent, Stylize, style};
use std::io::{self, IsTerminal, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tracing::debug;
use vidtally_core::EventSink;
use vidtally_models::{Event, Status};
use vidtally_utils::duration::{format_breakdown, seconds_to_hours, seconds_to_minutes};

const WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Header,
    Folder,
    Total,
    Grand,
}

impl Tag {
    fn paint(self, text: &str) -> StyledContent<String> {
        let content = style(text.to_string());
        match self {
            Self::Header => content.magenta().bold(),
            Self::Folder => content.blue().bold(),
            Self::Total => content.green().bold(),
            Self::Grand => content.dark_magenta().bold(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tag: Option<Tag>,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    fn tagged(text: impl Into<String>, tag: Tag) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag),
        }
    }

    fn blank() -> Self {
        Self::plain("")
    }
}

fn rule(ch: char) -> Line {
    Line::plain(ch.to_string().repeat(WIDTH))
}

fn banner(title: &str) -> Vec<Line> {
    vec![
        Line::blank(),
        rule('='),
        Line::tagged(title, Tag::Header),
        rule('='),
        Line::blank(),
    ]
}

fn glyph(event: &Event) -> &'static str {
    event.status().glyph()
}

#[must_use]
pub const fn install_hint() -> &'static str {
    if cfg!(windows) {
        "Windows: Download from https://ffmpeg.org/download.html"
    } else if cfg!(target_os = "macos") {
        "Mac: brew install ffmpeg"
    } else {
        "Linux: sudo apt install ffmpeg"
    }
}

/// Turns one event into report lines.
#[allow(clippy::too_many_lines)]
#[must_use]
pub fn render(event: &Event) -> Vec<Line> {
    match event {
        Event::ScanStarted { root } => {
            let mut lines = banner("VIDEO DURATION ANALYSIS");
            lines.push(Line::plain(format!("Root: {}", root.display())));
            lines
        }
        Event::FolderStarted { path } => vec![
            Line::blank(),
            Line::tagged(format!("📁 {}", path.display()), Tag::Folder),
            rule('-'),
        ],
        Event::FileProbed { .. }
        | Event::ProbeTimedOut { .. }
        | Event::ProbeFailed { .. }
        | Event::FolderListingFailed { .. } => {
            vec![Line::plain(format!("  {} {event}", glyph(event)))]
        }
        Event::ProberMissing { program } => vec![
            Line::blank(),
            Line::tagged(
                format!(
                    "{} ERROR: {} not found. Please install FFmpeg:",
                    glyph(event),
                    program.display()
                ),
                Tag::Header,
            ),
            Line::plain(format!("   {}", install_hint())),
            Line::blank(),
        ],
        Event::FolderFinished {
            video_count, seconds, ..
        } => vec![
            Line::blank(),
            Line::tagged("  Folder Summary:", Tag::Total),
            Line::plain(format!("  • Videos: {video_count}")),
            Line::plain(format!("  • Duration: {}", format_breakdown(*seconds))),
        ],
        Event::ScanCancelled => vec![
            Line::blank(),
            Line::tagged(format!("{} {event}", glyph(event)), Tag::Header),
        ],
        Event::ScanReport {
            summaries,
            total_seconds,
        } => {
            let mut lines = banner("FINAL REPORT");
            lines.extend(
                summaries
                    .iter()
                    .map(|summary| Line::plain(format!("{}: {:.2} min", summary.name, summary.minutes))),
            );
            lines.push(Line::blank());
            lines.push(rule('-'));
            lines.push(Line::tagged(
                format!(
                    "TOTAL: {:.2} min ({:.2} hours)",
                    seconds_to_minutes(*total_seconds),
                    seconds_to_hours(*total_seconds)
                ),
                Tag::Grand,
            ));
            lines.push(rule('='));
            lines
        }
        Event::RenameStarted { .. } => banner("RENAMING FOLDERS"),
        Event::Renamed { old_name, new_name } => vec![
            Line::plain(format!("{} Renamed: {old_name}", glyph(event))),
            Line::plain(format!("       → {new_name}")),
            Line::blank(),
        ],
        Event::Reverted { new_name, old_name } => vec![
            Line::plain(format!("{} Reverted: {new_name}", glyph(event))),
            Line::plain(format!("       → {old_name}")),
            Line::blank(),
        ],
        Event::RenameSkipped { .. } | Event::RevertSkipped { .. } | Event::RevertMissing { .. } => {
            vec![Line::plain(format!("{} {event}", glyph(event)))]
        }
        Event::RenameFailed { .. } | Event::RevertFailed { .. } => vec![
            Line::plain(format!("{} {event}", glyph(event))),
            Line::blank(),
        ],
        Event::RenameFinished { counts } => {
            phase_summary("RENAME SUMMARY:", "renamed", counts.renamed, counts.skipped, counts.errors)
        }
        Event::RevertStarted { .. } => banner("REVERTING RENAMES"),
        Event::RevertFinished { counts } => {
            phase_summary("REVERT SUMMARY:", "reverted", counts.reverted, counts.skipped, counts.errors)
        }
    }
}

fn phase_summary(title: &str, verb: &str, done: usize, skipped: usize, errors: usize) -> Vec<Line> {
    let mut lines = vec![
        rule('-'),
        Line::tagged(title, Tag::Header),
        Line::tagged(
            format!("{} Successfully {verb}: {done}", Status::Success.glyph()),
            Tag::Total,
        ),
    ];
    if skipped > 0 {
        lines.push(Line::plain(format!("{} Skipped: {skipped}", Status::Skipped.glyph())));
    }
    if errors > 0 {
        lines.push(Line::plain(format!("{} Errors: {errors}", Status::Error.glyph())));
    }
    lines.push(rule('='));
    lines
}

/// Renders events to stdout, styled when stdout is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    styled: bool,
}

impl ConsoleSink {
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            styled: io::stdout().is_terminal(),
        }
    }

    fn write_lines(&self, lines: &[Line]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        for line in lines {
            match line.tag {
                Some(tag) if self.styled => queue!(out, PrintStyledContent(tag.paint(&line.text)), Print("\n"))?,
                _ => queue!(out, Print(&line.text), Print("\n"))?,
            }
        }
        out.flush()
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: Event) {
        if let Err(e) = self.write_lines(&render(&event)) {
            debug!("Failed to write to stdout: {}", e);
        }
    }
}

/// Yes/no questions asked on stderr.
///
/// One buffered reader serves every question of a run, so answers piped in
/// ahead of time are not lost between prompts.
pub struct Prompt<R> {
    input: R,
}

impl Prompt<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub const fn new(input: R) -> Self {
        Self { input }
    }

    /// Anything but "y"/"yes" is a no, end of input included.
    ///
    /// # Errors
    ///
    /// Returns an error if stderr cannot be flushed or the input cannot be read.
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        eprint!("{question} [y/N] ");
        io::stderr().flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer).await?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

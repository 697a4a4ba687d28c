use clap::Parser;
use color_eyre::eyre::{Result, bail};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use vidtally_config::Settings;
use vidtally_core::{
    CancelToken, DurationScanner, EventSink, FfprobeProber, TracingSink, rename_with_duration, revert_renames,
};
use vidtally_models::{RenameCounts, RenameHistory, RevertCounts, ScanOutcome};
use vidtally_utils::create_log_path;

mod cli;
mod console;
use cli::Cli;
use console::{ConsoleSink, Prompt};

#[derive(Debug, Default, Serialize)]
struct RunReport {
    scan: ScanOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    rename: Option<RenameCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<RenameHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revert: Option<RevertCounts>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    setup_logging().await?;

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        return Err(e);
    }

    Ok(())
}

async fn setup_logging() -> Result<()> {
    let log_path = create_log_path("vidtally").await?;

    // Create or truncate log file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_env("VIDTALLY_LOG").unwrap_or_else(|_| EnvFilter::new("vidtally=debug,info"));

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .init();

    info!("Starting vidtally...");
    info!("Log file: {}", log_path.display());

    Ok(())
}

/// First Ctrl-C asks the scan to stop at its next checkpoint, a second one exits.
fn spawn_interrupt_watcher(cancel: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("Cancellation requested");
        eprintln!("\nCancelling... (press Ctrl-C again to quit)");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path).await?,
        None => Settings::load().await?,
    };
    cli.apply(&mut settings)?;

    if cli.save_config {
        match &cli.config {
            Some(path) => settings.save_to(path)?,
            None => settings.save()?,
        }
    }

    if !cli.folder.is_dir() {
        bail!("Folder does not exist: {}", cli.folder.display());
    }

    let prober = FfprobeProber::new(settings.ffprobe_path.clone(), settings.probe_timeout());
    info!("Probing with {:?} (timeout {:?})", prober.program(), prober.timeout());
    let scanner = Arc::new(DurationScanner::new(prober, settings.extensions()?));
    info!("Scanning {:?} for {}", cli.folder, scanner.extensions());
    let sink: Arc<dyn EventSink> = if cli.json {
        Arc::new(TracingSink)
    } else {
        Arc::new(ConsoleSink::stdout())
    };

    let cancel = CancelToken::new();
    spawn_interrupt_watcher(cancel.clone());

    // the scan runs on its own task so the signal watcher stays responsive
    let scan = tokio::spawn({
        let scanner = Arc::clone(&scanner);
        let sink = Arc::clone(&sink);
        let cancel = cancel.clone();
        let root = cli.folder.clone();
        async move { scanner.scan(&root, &cancel, sink.as_ref()).await }
    });
    let outcome = scan.await??;
    info!(
        "Scan finished: {} folders, {:.2} min ({:.2} hours){}",
        outcome.summaries.len(),
        outcome.total_minutes(),
        outcome.total_hours(),
        if outcome.cancelled { ", cancelled" } else { "" }
    );

    let mut report = RunReport {
        scan: outcome,
        ..RunReport::default()
    };

    if cli.rename && !report.scan.cancelled && !report.scan.is_empty() {
        rename_phase(&cli, &mut report, sink.as_ref()).await?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

async fn rename_phase(cli: &Cli, report: &mut RunReport, sink: &dyn EventSink) -> Result<()> {
    let folders = report.scan.summaries.len();
    let mut prompt = Prompt::stdin();
    if !cli.yes {
        let question = format!(
            "This will rename {folders} folders by adding duration.\n\
             Example: '01. Introduction' → '01. Introduction (33 min)'\n\
             Continue?"
        );
        if !prompt.confirm(&question).await? {
            info!("Rename declined");
            return Ok(());
        }
    }

    let (mut history, counts) = rename_with_duration(&report.scan.summaries, sink);
    report.rename = Some(counts);

    if counts.renamed > 0 && !cli.yes {
        let question = format!(
            "Revert these {} renames and restore the original folder names?",
            history.len()
        );
        if prompt.confirm(&question).await? {
            report.revert = Some(revert_renames(&mut history, sink));
        }
    }

    if !history.is_empty() {
        report.history = Some(history);
    }
    Ok(())
}

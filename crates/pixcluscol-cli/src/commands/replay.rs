use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pixcluscol_core::annotator::parse_event_log;
use tracing::info;

#[derive(Args)]
pub struct ReplayArgs {
    /// Label grid (.npy or grayscale image)
    pub file: PathBuf,

    /// Event log: one of `enter`, `leave`, `move X Y`, `click X Y`, `key NAME` per line
    #[arg(short, long)]
    pub events: PathBuf,

    /// Saved annotation to start from
    #[arg(short, long)]
    pub annotation: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the resulting annotation here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let mut annotator = super::open_annotator(&args.file, args.annotation.as_ref(), config)?;

    let text = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read events {}", args.events.display()))?;
    let events = parse_event_log(&text)?;
    let count = events.len();

    annotator.replay(events).context("Replay stopped")?;
    info!(events = count, mode = ?annotator.mode(), "Replay finished");

    let status = annotator.status_text();
    if !status.is_empty() {
        eprintln!("{status}");
    }

    if let Some(ref path) = args.output {
        annotator
            .save_annotation(path)
            .with_context(|| format!("Failed to write annotation to {}", path.display()))?;
        println!("Annotation saved to {}", path.display());
    } else {
        println!("{}", annotator.serialize()?);
    }
    Ok(())
}

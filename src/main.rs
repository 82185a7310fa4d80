//! videolist — find the videos on a device and pick one to play.
//!
//! Thin binary entry point. All logic lives in the `videolist-core`
//! and `videolist-app` crates.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use videolist_app::AppState;
use videolist_core::config::{VideoListConfig, DEFAULT_CONFIG_FILE};
use videolist_core::model::{VideoEntry, VideoSource};
use videolist_core::scanner::WalkOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to walk for videos (overrides `[scan].root`)
    #[arg()]
    root: Option<PathBuf>,

    /// SQLite media catalog to query instead of walking
    #[arg(long)]
    index: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Walk with one thread per CPU instead of serially
    #[arg(long)]
    parallel: bool,

    /// Print the play target of entry N (0-based) instead of the list
    #[arg(long, value_name = "N")]
    open: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// One flat CSV row.
#[derive(Serialize)]
struct CsvRow<'a> {
    index: usize,
    name: &'a str,
    kind: &'static str,
    location: String,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON/CSV on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = VideoListConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(root) = args.root {
        config.scan.root = root;
    }
    if let Some(index) = args.index {
        config.index.database = Some(index);
    }
    if args.parallel {
        config.scan.walk_threads = WalkOptions::all_cores().threads;
    }

    info!("videolist starting");

    let mut state = AppState::build(&config)?;
    if !state.refresh() && state.permission_denied() {
        bail!(
            "{}",
            state.error_message().unwrap_or("storage read permission denied")
        );
    }
    state.wait_for_scan();

    if let Some(msg) = state.error_message() {
        bail!("{msg}");
    }
    if let Some(msg) = state.warning() {
        warn!("{msg}");
    }

    if let Some(n) = args.open {
        match state.on_item_clicked(n) {
            Some(target) => println!("{target}"),
            None => bail!("no entry {n}: {} videos found", state.videos().len()),
        }
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => write_table(&mut out, state.videos())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, state.videos())?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, state.videos())?,
    }

    Ok(())
}

fn write_table(out: &mut impl Write, videos: &[VideoEntry]) -> anyhow::Result<()> {
    for (i, video) in videos.iter().enumerate() {
        writeln!(out, "{i:>4}  {:<40}  {}", video.display_name(), video.location())?;
    }
    writeln!(out, "{} videos", videos.len())?;
    Ok(())
}

fn write_csv(out: &mut impl Write, videos: &[VideoEntry]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for (index, video) in videos.iter().enumerate() {
        let kind = match video.source() {
            VideoSource::Indexed(_) => "indexed",
            VideoSource::File(_) => "file",
        };
        writer.serialize(CsvRow {
            index,
            name: video.display_name(),
            kind,
            location: video.location(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

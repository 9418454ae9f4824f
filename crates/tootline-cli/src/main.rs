//! tootline: replay a timeline from a status fixture.
//!
//! Usage:
//!   # Show the first page of a fixture
//!   cargo run -p tootline-cli -- --fixture statuses.json
//!
//!   # Replay scripted stream events and scrolling on top of it
//!   cargo run -p tootline-cli -- --fixture statuses.json --script steps.jsonl
//!
//! The fixture is a JSON array of statuses, newest-first, in the shape the
//! timeline endpoints return. Logs go to stderr; set `RUST_LOG` to adjust.

mod render;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use tootline_client::{FetchError, MemorySource, Timeline, TimelineConfig};

/// Replay a status fixture through a live timeline buffer.
#[derive(Parser, Debug)]
#[command(name = "tootline")]
#[command(about = "Replay a status fixture through a tootline timeline")]
struct Args {
    /// JSON array of statuses, newest-first
    #[arg(long)]
    fixture: PathBuf,

    /// JSON-lines script of stream events and view actions
    #[arg(long)]
    script: Option<PathBuf>,

    /// Timeline config (RON); defaults to the platform config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print statuses matching this text
    #[arg(long)]
    filter: Option<String>,

    /// Make the initial fetch fail, as an unreachable server would
    #[arg(long)]
    fail_initial: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.or_else(TimelineConfig::default_path) {
        Some(path) => TimelineConfig::load_or_default(&path)?,
        None => TimelineConfig::default(),
    };

    let fixture = std::fs::read_to_string(&args.fixture)
        .with_context(|| format!("reading fixture {}", args.fixture.display()))?;
    let source = Arc::new(
        MemorySource::from_json(&fixture)
            .with_context(|| format!("parsing fixture {}", args.fixture.display()))?,
    );
    tracing::info!(statuses = source.len(), "Loaded fixture");

    if args.fail_initial {
        source.set_failure(Some(FetchError::Network("connection refused".into())));
    }

    let timeline = Timeline::new(source, &config);
    if timeline.fetch_initial().await.is_err() {
        tracing::warn!("Timeline disabled: initial fetch failed");
        return Ok(());
    }

    if let Some(filter) = args.filter {
        timeline.set_filter(filter);
    }

    if let Some(path) = args.script {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading script {}", path.display()))?;
        let steps = script::parse_script(&text)?;
        tracing::info!(steps = steps.len(), "Replaying script");
        script::run(&timeline, steps).await?;
    }

    print!("{}", render::render_timeline(&timeline.snapshot(), &config.display));
    Ok(())
}

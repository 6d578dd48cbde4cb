//! Boundary check CLI.
//!
//! Loads the competition boundary and checks location samples against it.
//! Samples come from flags (one-shot) or from stdin, one line per check.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use warbler::config::Config;
use warbler::{BoundarySource, BoundaryStore, DisplaySink, GeoPoint, Session, StatusReport};

mod providers;
use providers::{parse_sample_line, ChannelProvider, StaticProvider};

#[derive(Parser, Debug)]
#[command(name = "check")]
#[command(about = "Birding competition boundary checker")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Boundary source: HTTPS URL or local GeoJSON path (overrides config)
    #[arg(long)]
    boundary: Option<String>,

    /// Check a single fixed latitude (requires --lon)
    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Check a single fixed longitude (requires --lat)
    #[arg(long, requires = "lat")]
    lon: Option<f64>,
}

/// Prints status updates; the CLI's display layer.
struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn update(&self, report: &StatusReport) {
        match report.marker {
            Some(p) => println!(
                "[{}] {} ({:.5}, {:.5})",
                report.category, report.message, p.lat, p.lon
            ),
            None => println!("[{}] {}", report.category, report.message),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Some(Config::load_from_file(path)?),
        None => None,
    };

    let source = args
        .boundary
        .clone()
        .or_else(|| config.as_ref().map(|c| c.boundary.source.clone()))
        .map(|s| BoundarySource::parse(&s))
        .context("No boundary source: pass --boundary or a config file")?;

    let policy = config
        .as_ref()
        .map(|c| c.location.policy())
        .unwrap_or_default();

    let sink = Arc::new(StdoutSink);
    let store = Arc::new(BoundaryStore::new());

    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        let provider = Arc::new(StaticProvider::new(GeoPoint::new(lat, lon)));
        let session = Session::new(store, provider, policy, sink);
        session
            .load_boundary(&source)
            .await
            .context("Boundary load failed")?;
        let _ = session.check_location().await;
        return Ok(());
    }

    // Interactive mode: each stdin line is one user trigger
    let (provider, samples) = ChannelProvider::new();
    let session = Session::new(store, Arc::new(provider), policy, sink);

    let collection = session
        .load_boundary(&source)
        .await
        .context("Boundary load failed")?;
    if let Some((min_lon, min_lat, max_lon, max_lat)) = collection.bbox() {
        info!(
            "Boundary covers ({:.4}, {:.4}) to ({:.4}, {:.4})",
            min_lat, min_lon, max_lat, max_lon
        );
    }

    info!("Reading samples from stdin: \"lat,lon[,accuracy]\" or denied/unavailable/timeout");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_sample_line(line) {
            Some(result) => {
                if samples.send(result).is_err() {
                    break;
                }
                let _ = session.check_location().await;
            }
            None => warn!("Unparseable sample line: {:?}", line),
        }
    }

    Ok(())
}

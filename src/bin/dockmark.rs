//! dockmark CLI — survey a fiducial-marker layout into world-frame corners.

use anyhow::{Context, Result};
use clap::Parser;
use dockmark::layout::{Layout, LayoutFile};
use dockmark::{report, survey};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Survey a planar fiducial-marker layout into world-frame 3D corner
/// positions.
#[derive(Parser)]
#[command(name = "dockmark", version)]
struct Args {
    /// Layout file (TOML): drawing unit, dock mounting pose, and markers.
    layout: PathBuf,

    /// Emit the records as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Pretty-print the JSON output.
    #[arg(long, requires = "json")]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let document = fs::read_to_string(&args.layout)
        .with_context(|| format!("failed to read layout file {}", args.layout.display()))?;
    let file: LayoutFile = toml::from_str(&document)
        .with_context(|| format!("failed to parse layout file {}", args.layout.display()))?;
    let layout = Layout::try_from(file)
        .with_context(|| format!("invalid layout in {}", args.layout.display()))?;

    let surveyed = survey(&layout);

    let mut out = io::stdout().lock();
    if args.json {
        if args.pretty {
            serde_json::to_writer_pretty(&mut out, &surveyed)?;
        } else {
            serde_json::to_writer(&mut out, &surveyed)?;
        }
        writeln!(out)?;
    } else {
        report::write_text(&mut out, &surveyed)?;
    }

    Ok(())
}

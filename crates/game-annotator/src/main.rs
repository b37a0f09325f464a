//! Game annotator CLI
//!
//! Reads a positions JSON array (file or stdin), writes the report JSON.
//!
//! Usage:
//!   annotate [INPUT|-] [--openings PATH] [--output PATH] [--pretty]
//!
//! ANNOTATOR_OPENINGS and ANNOTATOR_PRETTY may also be set, or put in a .env file.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

use anyhow::Context;
use chess_core::Position;
use game_annotator::{analyse, load_openings_or_empty, AnnotatorConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout is the report
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = AnnotatorConfig::load()?;

    let raw = match &config.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            buf
        }
    };

    let positions: Vec<Position> = serde_json::from_str(&raw).context("invalid positions JSON")?;
    let openings = load_openings_or_empty(&config.openings_path);

    let report = analyse(positions, &openings).context("failed to generate report")?;

    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("failed to create {}", path.display()))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, &report)?;
    } else {
        serde_json::to_writer(&mut writer, &report)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    if let Some(path) = &config.output {
        info!(path = %path.display(), "Report written");
    }

    Ok(())
}

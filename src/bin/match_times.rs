//! Align a query timestamp series with a primary series and export the matches.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use geospace::config::{MatchConfig, load_match_config};
use geospace::export::matches::{self, Record, Status};
use geospace::export::summary::{self, Metadata, Tallies};
use geospace::matching::{MatchOptions, match_times};
use geospace::series::load_timestamp_column;
use geospace::time::Timestamp;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Match every query timestamp to the nearest primary timestamp"
)]
struct Cli {
    /// CSV whose first column holds the ascending primary timestamps
    #[arg(long)]
    primary: PathBuf,

    /// CSV whose first column holds the timestamps to match
    #[arg(long)]
    query: PathBuf,

    /// Optional TOML or YAML matcher configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Matching window in microseconds (overrides the configuration)
    #[arg(long)]
    tolerance_us: Option<f64>,

    /// Let several query timestamps share one primary timestamp
    /// (`--allow-duplicates` or `--allow-duplicates=<bool>`; overrides the configuration)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    allow_duplicates: Option<bool>,

    /// chrono format of the timestamps (overrides the configuration)
    #[arg(long)]
    format: Option<String>,

    /// Treat the first row of each input as a header
    #[arg(long, default_value_t = false)]
    has_headers: bool,

    /// Output CSV path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Optional JSON summary sidecar path
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_match_config(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(tolerance_us) = cli.tolerance_us {
        config.tolerance_us = tolerance_us;
    }
    if let Some(allow_duplicates) = cli.allow_duplicates {
        config.allow_duplicates = allow_duplicates;
    }
    if let Some(format) = &cli.format {
        config.timestamp_format = format.clone();
    }
    config.validate()?;

    let primary = load_timestamp_column(&cli.primary, &config.timestamp_format, cli.has_headers)
        .with_context(|| format!("reading primary series {}", cli.primary.display()))?;
    let query = load_timestamp_column(&cli.query, &config.timestamp_format, cli.has_headers)
        .with_context(|| format!("reading query series {}", cli.query.display()))?;
    info!(
        version = geospace::version(),
        primary = primary.len(),
        query = query.len(),
        tolerance_us = config.tolerance_us,
        "matching timestamps"
    );

    let options = MatchOptions::from(&config);
    let outcome = match_times(&primary.values, &query.values, &options)?;

    let mut writer = matches::writer_for_path(&cli.output)
        .with_context(|| format!("opening output {}", cli.output.display()))?;
    matches::write_header(&mut writer)?;
    let mut failed = vec![false; outcome.indices.len()];
    for failure in &outcome.failures {
        failed[failure.position] = true;
    }
    for (position, index) in outcome.indices.iter().enumerate() {
        let status = match index {
            Some(_) => Status::Matched,
            None if failed[position] => Status::Failed,
            None => Status::Unmatched,
        };
        let record = Record {
            query_position: position,
            query_time: &query.raw[position],
            primary_index: *index,
            primary_time: index.map(|i| primary.raw[i].as_str()),
            offset_us: index.map(|i| primary.values[i].micros_since(&query.values[position])),
            status,
        };
        record.write_to(&mut writer)?;
    }
    writer.flush()?;

    if let Some(path) = &cli.summary {
        let primary_source = cli.primary.display().to_string();
        let query_source = cli.query.display().to_string();
        let meta = Metadata {
            primary_source: &primary_source,
            query_source: &query_source,
            primary_len: primary.len(),
            tolerance_us: options.tolerance_us,
            allow_duplicates: options.allow_duplicates,
        };
        let s = outcome.summary;
        let tallies = Tallies {
            total: s.total,
            matched: s.matched,
            unique_matched: s.unique_matched,
            unmatched: s.unmatched,
            ambiguous: s.ambiguous,
            failed: s.failed,
        };
        summary::write_summary(path, &meta, &tallies)
            .with_context(|| format!("writing summary {}", path.display()))?;
    }

    Ok(())
}

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use covergrid_settings::Strategy;
use covergrid_types::Point;

#[derive(Parser, Debug)]
#[command(name = "covergrid", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Count cells within the threshold of any marker.
    Count(QueryArgs),

    /// Compute the closed form and the exact enumeration side by side.
    ///
    /// Exits non-zero when both are available and differ.
    Check(QueryArgs),
}

/// A counting query, assembled from flags and an optional input file.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Grid width (number of columns).
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<i64>,

    /// Grid height (number of rows).
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<i64>,

    /// Manhattan distance threshold.
    #[arg(long, short = 'n', allow_hyphen_values = true)]
    pub threshold: Option<i64>,

    /// Marker position; repeatable. Appended to markers from --input.
    #[arg(
        long = "marker",
        value_name = "ROW,COL",
        value_parser = parse_marker,
        allow_hyphen_values = true
    )]
    pub markers: Vec<Point>,

    /// Request file (.toml or .json) with width, height, threshold, markers.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Settings file (.toml or .json).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Counting strategy.
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Refuse to enumerate more than this many cells.
    #[arg(long, value_name = "CELLS", conflicts_with = "no_enumeration_limit")]
    pub enumeration_limit: Option<u64>,

    /// Enumerate regardless of cost.
    #[arg(long)]
    pub no_enumeration_limit: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain numbers.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Parse `ROW,COL` into a [`Point`].
pub fn parse_marker(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{s}'"))?;
    let row = row
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid row '{}': {e}", row.trim()))?;
    let col = col
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid column '{}': {e}", col.trim()))?;
    Ok(Point::new(row, col))
}

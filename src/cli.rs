//! CLI argument parsing for perfmon-fixtures

use crate::csv_output::LineEnding;
use crate::dataset::DEFAULT_HOURS;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Built-in dataset selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    /// Steady leak, noise and stepwise leak over `--hours`
    Large,
    /// 30 samples of linear growth and a short cycle
    Small,
}

#[derive(Parser, Debug)]
#[command(name = "perfmon-fixtures")]
#[command(version)]
#[command(about = "Generate synthetic PDH-CSV performance counter logs", long_about = None)]
pub struct Cli {
    /// Directory to write the generated files into
    #[arg(short, long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Duration of the large dataset in hours (one sample per minute)
    #[arg(
        long,
        value_name = "HOURS",
        default_value_t = DEFAULT_HOURS,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with = "config"
    )]
    pub hours: u32,

    /// Generate only one of the built-in datasets
    #[arg(long, value_enum, conflicts_with = "config")]
    pub only: Option<DatasetKind>,

    /// Generate the datasets described in a TOML profile instead of the built-ins
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Row terminator
    #[arg(long = "line-ending", value_enum, default_value = "crlf")]
    pub line_ending: LineEnding,

    /// Enable debug tracing output (to stderr)
    #[arg(long)]
    pub debug: bool,
}

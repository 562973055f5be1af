//! CLI argument parsing for the Eurovision sweepstake

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Format of the results artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One row per attendee, one column per country (default)
    Csv,
    /// JSON array for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "eurovision")]
#[command(version)]
#[command(about = "Select countries for people when watching Eurovision", long_about = None)]
#[command(after_help = "Exit status: 0 on success, 1 when a run fails, 2 on a usage error \
                         (including no --people or --people-list), 255 when an input file \
                         cannot be read.")]
#[command(group(
    ArgGroup::new("roster")
        .required(true)
        .args(["people", "people_list"])
))]
pub struct Cli {
    /// CSV file of countries in the competition (one per row or column)
    #[arg(long = "countries", value_name = "PATH", conflicts_with = "countries_list")]
    pub countries: Option<PathBuf>,

    /// Names of countries in the competition
    #[arg(long = "countries-list", value_name = "COUNTRY", num_args = 1..)]
    pub countries_list: Option<Vec<String>>,

    /// CSV file of attendee names and the countries each one excludes
    #[arg(long = "people", value_name = "PATH")]
    pub people: Option<PathBuf>,

    /// Names of people attending the party
    #[arg(long = "people-list", value_name = "NAME", num_args = 1..)]
    pub people_list: Option<Vec<String>>,

    /// Countries nobody from --people-list may be given
    #[arg(long = "exclude", value_name = "COUNTRY", num_args = 1.., requires = "people_list")]
    pub exclude: Vec<String>,

    /// File to save results to (overwritten)
    #[arg(short = 'o', long = "outfile", value_name = "PATH", default_value = "eurovision.csv")]
    pub outfile: PathBuf,

    /// Number of allocation rounds
    #[arg(short = 'n', long = "loops", value_name = "N", default_value = "1000")]
    pub loops: usize,

    /// Results format
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Seed the random generator for a reproducible run
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

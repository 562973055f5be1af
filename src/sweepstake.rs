//! Run orchestration: load the catalog and roster, allocate, report
//!
//! A run either completes every round for every attendee and writes its
//! results, or fails before any artifact is written.

use crate::allocation::{self, TracingObserver};
use crate::attendee::Attendee;
use crate::cli::{Cli, OutputFormat};
use crate::country::CountryCatalog;
use crate::error::Result;
use crate::report;
use crate::roster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Where the country catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountrySource {
    /// Built-in 2016 contest line-up
    Default,
    /// Names given on the command line
    List(Vec<String>),
    /// CSV file of names
    File(PathBuf),
}

/// Where the attendees come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    /// Names with one exclusion list shared by everyone
    List {
        names: Vec<String>,
        excluded: Vec<String>,
    },
    /// CSV file of names and per-attendee exclusions
    File(PathBuf),
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub countries: CountrySource,
    pub roster: RosterSource,
    pub rounds: usize,
    pub outfile: PathBuf,
    pub format: OutputFormat,
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Random generator for this run: seeded if asked, else from OS entropy
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl From<Cli> for RunConfig {
    fn from(args: Cli) -> Self {
        let countries = match (args.countries_list, args.countries) {
            (Some(names), _) => CountrySource::List(names),
            (None, Some(path)) => CountrySource::File(path),
            (None, None) => CountrySource::Default,
        };

        // clap guarantees one roster source
        let roster = match (args.people, args.people_list) {
            (Some(path), _) => RosterSource::File(path),
            (None, names) => RosterSource::List {
                names: names.unwrap_or_default(),
                excluded: args.exclude,
            },
        };

        Self {
            countries,
            roster,
            rounds: args.loops,
            outfile: args.outfile,
            format: args.format,
            seed: args.seed,
        }
    }
}

/// Build the country catalog
pub fn load_catalog(source: &CountrySource) -> Result<CountryCatalog> {
    match source {
        CountrySource::Default => Ok(CountryCatalog::default_contest()),
        CountrySource::List(names) => Ok(CountryCatalog::from_names(names)),
        CountrySource::File(path) => CountryCatalog::from_csv_path(path),
    }
}

/// Build the roster against `catalog`
pub fn load_roster(source: &RosterSource, catalog: &CountryCatalog) -> Result<Vec<Attendee>> {
    match source {
        RosterSource::List { names, excluded } => {
            Ok(roster::build_roster(names.iter().cloned(), catalog, excluded))
        }
        RosterSource::File(path) => roster::build_roster_from_csv(path, catalog),
    }
}

/// Execute a full run, writing the artifact and then the summary to `out`
///
/// Returns the attendees in draw order with their final counts.
pub fn run<R, W>(config: &RunConfig, rng: &mut R, out: &mut W) -> Result<Vec<Attendee>>
where
    R: Rng + ?Sized,
    W: Write,
{
    let catalog = load_catalog(&config.countries)?;
    let mut attendees = load_roster(&config.roster, &catalog)?;
    info!(
        "Running {} rounds for {} attendees over {} countries",
        config.rounds,
        attendees.len(),
        catalog.len()
    );

    let stats = allocation::allocate_observed(
        &mut attendees,
        &catalog,
        config.rounds,
        rng,
        &mut TracingObserver,
    )?;
    info!(
        "Completed {} rounds ({} draws, {} rejected for exclusions)",
        stats.rounds, stats.draws, stats.rejected
    );

    report::write_results_to_path(&config.outfile, config.format, &attendees, &catalog)?;
    info!("Results written to {}", config.outfile.display());

    report::write_summary(out, &attendees)?;
    Ok(attendees)
}

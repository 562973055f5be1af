//! Roster building from a name list or a CSV of names and exclusions
//!
//! CSV rows look like `name[,excluded...]`. The excluded part may be one
//! quoted field (`Mike,"Ireland, Sweden"`), a `;`-separated field
//! (`Mike,Ireland;Sweden`) or several plain fields (`Mike,Ireland,Sweden`).
//! Every excluded name is sanitized with the catalog rule so it compares
//! equal to catalog tokens.

use crate::attendee::Attendee;
use crate::country::{sanitize_country_name, CountryCatalog};
use crate::error::{Result, SweepstakeError};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Build one attendee per name, all sharing `shared_excluded`
pub fn build_roster<N, E>(names: N, catalog: &CountryCatalog, shared_excluded: E) -> Vec<Attendee>
where
    N: IntoIterator,
    N::Item: Into<String>,
    E: IntoIterator,
    E::Item: AsRef<str>,
{
    let excluded = parse_exclusions(shared_excluded);
    names
        .into_iter()
        .map(|name| Attendee::new(name, catalog, excluded.iter().cloned()))
        .collect()
}

/// Build the roster from a CSV file
///
/// The file is read whole before parsing, so an unreadable path fails as
/// [`SweepstakeError::InputUnavailable`] rather than as a CSV error.
pub fn build_roster_from_csv(path: impl AsRef<Path>, catalog: &CountryCatalog) -> Result<Vec<Attendee>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SweepstakeError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = build_roster_from_reader(bytes.as_slice(), catalog)?;
    debug!("Loaded {} attendees from {}", roster.len(), path.display());
    Ok(roster)
}

/// Build the roster from any CSV reader
pub fn build_roster_from_reader<R: Read>(reader: R, catalog: &CountryCatalog) -> Result<Vec<Attendee>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut roster = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);

        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            return Err(SweepstakeError::MalformedRoster { line });
        }

        let excluded = parse_exclusions(record.iter().skip(1));
        roster.push(Attendee::new(name, catalog, excluded));
    }

    Ok(roster)
}

/// Split raw exclusion fields on `,` and `;`, dropping blanks, and sanitize
fn parse_exclusions<I>(fields: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut excluded = Vec::new();
    for field in fields {
        excluded.extend(
            field
                .as_ref()
                .split([',', ';'])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(sanitize_country_name),
        );
    }
    excluded
}

//! Country catalog: the ordered set of country tokens taking part in a run
//!
//! Country names are reduced to tokens by replacing every character outside
//! `[A-Za-z]` with `_`. Tokens, not the raw names, are what attendees count
//! and exclude, so `"United Kingdom"` and `"United-Kingdom"` are the same
//! country.

use crate::error::{Result, SweepstakeError};
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Countries of the 2016 contest, used when no country source is given
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Albania",
    "Armenia",
    "Australia",
    "Austria",
    "Azerbaijan",
    "Belarus",
    "Belgium",
    "Bosnia and Herzegovina",
    "Bulgaria",
    "Croatia",
    "Cyprus",
    "Czech Republic",
    "Denmark",
    "Estonia",
    "F.Y.R. Macedonia",
    "Finland",
    "France",
    "Georgia",
    "Germany",
    "Greece",
    "Hungary",
    "Iceland",
    "Ireland",
    "Israel",
    "Italy",
    "Latvia",
    "Lithuania",
    "Malta",
    "Moldova",
    "Montenegro",
    "Norway",
    "Poland",
    "Romania",
    "Russia",
    "San Marino",
    "Serbia",
    "Slovenia",
    "Spain",
    "Sweden",
    "Switzerland",
    "The Netherlands",
    "Ukraine",
    "United Kingdom",
];

fn non_letter() -> &'static Regex {
    static NON_LETTER: OnceLock<Regex> = OnceLock::new();
    NON_LETTER.get_or_init(|| Regex::new(r"[^a-zA-Z]").expect("static pattern is valid"))
}

/// Reduce a country name to its token form
///
/// Each character outside `[A-Za-z]` becomes a single `_`; letters keep
/// their case and position. Applying it twice is the same as applying it once.
pub fn sanitize_country_name(name: &str) -> String {
    non_letter().replace_all(name, "_").into_owned()
}

/// Ordered list of country tokens
///
/// Order is significant: it is the column order of the results table and the
/// tie-break order for an attendee's top country. Duplicates supplied by the
/// caller are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountryCatalog {
    tokens: Vec<String>,
}

impl CountryCatalog {
    /// Build a catalog from raw country names, sanitizing each one
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: names
                .into_iter()
                .map(|name| sanitize_country_name(name.as_ref()))
                .collect(),
        }
    }

    /// The built-in 2016 contest line-up
    pub fn default_contest() -> Self {
        Self::from_names(DEFAULT_COUNTRIES)
    }

    /// Load country names from a CSV file
    ///
    /// Every non-empty field of every row is one country, read left to right
    /// and top to bottom, so both one-per-line and single-row files work.
    /// Any failure to read the file, a directory included, is
    /// [`SweepstakeError::InputUnavailable`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SweepstakeError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(bytes.as_slice())?;
        debug!(
            "Loaded {} countries from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load country names from any CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut names = Vec::new();
        for record in reader.records() {
            let record = record?;
            names.extend(
                record
                    .iter()
                    .filter(|field| !field.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(Self::from_names(names))
    }

    /// Tokens in catalog order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

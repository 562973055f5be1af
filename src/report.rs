//! Results table and console summary
//!
//! The results artifact has one header row `name,<token>,...` in catalog
//! order, then one row of counts per attendee. With `--format json` the same
//! data is written as a JSON array instead.

use crate::attendee::Attendee;
use crate::cli::OutputFormat;
use crate::country::CountryCatalog;
use crate::error::{Result, SweepstakeError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Count for one country in the JSON artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonCount {
    pub country: String,
    pub count: u64,
}

/// One attendee in the JSON artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAttendee {
    pub name: String,
    /// Counts in catalog order
    pub counts: Vec<JsonCount>,
    pub top_country: String,
    pub top_count: u64,
}

impl JsonAttendee {
    fn from_attendee(attendee: &Attendee, catalog: &CountryCatalog) -> Self {
        let (top_country, top_count) = attendee.top_country();
        Self {
            name: attendee.name().to_string(),
            counts: catalog
                .iter()
                .map(|token| JsonCount {
                    country: token.to_string(),
                    count: attendee.count(token),
                })
                .collect(),
            top_country,
            top_count,
        }
    }
}

/// Write the CSV results table to `writer`
pub fn write_results<W: Write>(
    writer: W,
    attendees: &[Attendee],
    catalog: &CountryCatalog,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(catalog.len() + 1);
    header.push("name");
    header.extend(catalog.iter());
    wtr.write_record(&header)?;

    for attendee in attendees {
        let mut row = Vec::with_capacity(catalog.len() + 1);
        row.push(attendee.name().to_string());
        row.extend(catalog.iter().map(|token| attendee.count(token).to_string()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the JSON results array to `writer`
pub fn write_results_json<W: Write>(
    writer: W,
    attendees: &[Attendee],
    catalog: &CountryCatalog,
) -> Result<()> {
    let records: Vec<JsonAttendee> = attendees
        .iter()
        .map(|a| JsonAttendee::from_attendee(a, catalog))
        .collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Render the artifact and write it to `path`, replacing any existing file
pub fn write_results_to_path(
    path: impl AsRef<Path>,
    format: OutputFormat,
    attendees: &[Attendee],
    catalog: &CountryCatalog,
) -> Result<()> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Csv => write_results(&mut buffer, attendees, catalog)?,
        OutputFormat::Json => {
            write_results_json(&mut buffer, attendees, catalog)?;
            buffer.push(b'\n');
        }
    }

    let path = path.as_ref();
    std::fs::write(path, buffer).map_err(|source| SweepstakeError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    })
}

/// `name -- top_country (count)`
pub fn summary_line(attendee: &Attendee) -> String {
    let (country, count) = attendee.top_country();
    format!("{} -- {} ({})", attendee.name(), country, count)
}

/// Emit one summary line per attendee, in slice order
pub fn write_summary<W: Write>(out: &mut W, attendees: &[Attendee]) -> Result<()> {
    for attendee in attendees {
        writeln!(out, "{}", summary_line(attendee))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mike_and_ireland() -> (Vec<Attendee>, CountryCatalog) {
        let catalog = CountryCatalog::from_names(["Ireland"]);
        let people = vec![Attendee::new("Mike", &catalog, Vec::<String>::new())];
        (people, catalog)
    }

    #[test]
    fn test_write_results_round_trip() {
        let (people, catalog) = mike_and_ireland();
        let mut buffer = Vec::new();
        write_results(&mut buffer, &people, &catalog).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name,Ireland", "Mike,0"]);
    }

    #[test]
    fn test_write_results_repeats_duplicate_column() {
        let catalog = CountryCatalog::from_names(["Malta", "Malta"]);
        let mut mike = Attendee::new("Mike", &catalog, Vec::<String>::new());
        mike.increment("Malta");

        let mut buffer = Vec::new();
        write_results(&mut buffer, &[mike], &catalog).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name,Malta,Malta", "Mike,1,1"]);
    }

    #[test]
    fn test_write_results_counts_in_catalog_order() {
        let catalog = CountryCatalog::from_names(["Ireland", "Sweden", "Malta"]);
        let mut mike = Attendee::new("Mike", &catalog, Vec::<String>::new());
        mike.increment("Malta");
        mike.increment("Malta");
        mike.increment("Ireland");

        let mut buffer = Vec::new();
        write_results(&mut buffer, &[mike], &catalog).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["name,Ireland,Sweden,Malta", "Mike,1,0,2"]);
    }

    #[test]
    fn test_write_results_quotes_names_with_commas() {
        let catalog = CountryCatalog::from_names(["Ireland"]);
        let people = vec![Attendee::new("Smith, Jo", &catalog, Vec::<String>::new())];
        let mut buffer = Vec::new();
        write_results(&mut buffer, &people, &catalog).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"Smith, Jo\",0"));
    }

    #[test]
    fn test_write_results_json() {
        let (mut people, catalog) = mike_and_ireland();
        people[0].increment("Ireland");
        let mut buffer = Vec::new();
        write_results_json(&mut buffer, &people, &catalog).unwrap();

        let parsed: Vec<JsonAttendee> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Mike");
        assert_eq!(parsed[0].top_country, "Ireland");
        assert_eq!(parsed[0].top_count, 1);
        assert_eq!(
            parsed[0].counts,
            vec![JsonCount {
                country: "Ireland".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_write_results_to_path_overwrites() {
        let (people, catalog) = mike_and_ireland();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "stale contents that are much longer than the table\n").unwrap();

        write_results_to_path(&path, OutputFormat::Csv, &people, &catalog).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["name,Ireland", "Mike,0"]);
    }

    #[test]
    fn test_write_results_to_unwritable_path() {
        let (people, catalog) = mike_and_ireland();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/results.csv");

        let result = write_results_to_path(&path, OutputFormat::Csv, &people, &catalog);
        assert!(matches!(
            result,
            Err(SweepstakeError::OutputUnwritable { .. })
        ));
    }

    #[test]
    fn test_summary_line() {
        let catalog = CountryCatalog::from_names(["Ireland", "Sweden"]);
        let mut mike = Attendee::new("Mike", &catalog, Vec::<String>::new());
        mike.increment("Sweden");
        assert_eq!(summary_line(&mike), "Mike -- Sweden (1)");
    }

    #[test]
    fn test_summary_line_no_hits() {
        let (people, _) = mike_and_ireland();
        assert_eq!(summary_line(&people[0]), "Mike --  (0)");
    }

    #[test]
    fn test_write_summary_in_order() {
        let catalog = CountryCatalog::from_names(["Ireland"]);
        let people = vec![
            Attendee::new("Mike", &catalog, Vec::<String>::new()),
            Attendee::new("Bill", &catalog, Vec::<String>::new()),
        ];
        let mut out = Vec::new();
        write_summary(&mut out, &people).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Mike --  (0)\nBill --  (0)\n"
        );
    }
}

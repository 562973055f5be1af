//! Error taxonomy for a sweepstake run
//!
//! Every failure is fatal for the run: there is no partial-success mode and
//! nothing is retried. The binary maps each variant to a process exit status
//! with [`SweepstakeError::exit_code`]. Usage errors never reach this type:
//! clap rejects them during parsing and exits with status 2, which includes
//! a run started without a roster source.
//!
//! Messages name only the failing step. The underlying cause is kept as the
//! error source, and the binary prints the whole chain.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status used when a roster or country source cannot be read
pub const EXIT_INPUT_UNAVAILABLE: u8 = 255;

/// Exit status for every other failed run
pub const EXIT_FAILURE: u8 = 1;

/// Errors that can occur while loading input, allocating or reporting
#[derive(Error, Debug)]
pub enum SweepstakeError {
    #[error("Input source unavailable: {}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed roster row {line}: attendee name is empty")]
    MalformedRoster { line: u64 },

    #[error(
        "Allocation exhausted in round {round}: no permitted country left for '{attendee}' \
         (add countries, remove exclusions or invite fewer people)"
    )]
    AllocationExhausted { round: usize, attendee: String },

    #[error("Cannot write results to {}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl SweepstakeError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            SweepstakeError::InputUnavailable { .. } => EXIT_INPUT_UNAVAILABLE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type for sweepstake operations
pub type Result<T> = std::result::Result<T, SweepstakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_unavailable_exit_code() {
        let err = SweepstakeError::InputUnavailable {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), 255);
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_exhausted_message_names_round_and_attendee() {
        let err = SweepstakeError::AllocationExhausted {
            round: 3,
            attendee: "Mike".to_string(),
        };
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        let msg = err.to_string();
        assert!(msg.contains("round 3"));
        assert!(msg.contains("'Mike'"));
    }

    #[test]
    fn test_output_unwritable_exit_code() {
        let err = SweepstakeError::OutputUnwritable {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), EXIT_FAILURE);
        assert!(err.to_string().contains("/nope/out.csv"));
    }

    #[test]
    fn test_display_leaves_cause_to_source_chain() {
        use std::error::Error as _;

        let err = SweepstakeError::InputUnavailable {
            path: PathBuf::from("people"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "Is a directory"),
        };
        assert_eq!(err.to_string(), "Input source unavailable: people");
        assert_eq!(err.source().unwrap().to_string(), "Is a directory");

        let err = SweepstakeError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(!err.to_string().contains("disk full"));
        assert!(err.source().is_some());
    }
}

//! Eurovision - randomized country sweepstake for viewing parties
//!
//! This library provides the country catalog, attendee records, roster
//! loading, the round-based allocation engine and results reporting used by
//! the `eurovision` binary.

pub mod allocation;
pub mod attendee;
pub mod cli;
pub mod country;
pub mod error;
pub mod report;
pub mod roster;
pub mod sweepstake;

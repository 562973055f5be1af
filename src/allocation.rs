//! Allocation engine: hands out countries to attendees, round after round
//!
//! # Algorithm
//!
//! The attendee order is shuffled once per run. Each round starts from a
//! fresh copy of the whole catalog; every attendee in turn draws uniformly
//! from what is left. An excluded draw is thrown back and the attendee draws
//! again from the same pool. A valid pick leaves the pool, so no country is
//! handed out twice in one round.
//!
//! Rejection sampling has no natural bound, so redraws are capped at
//! `REDRAW_LIMIT_FACTOR` times the pool size. Past the cap the pick is made
//! directly among the permitted countries, which is the same distribution.
//!
//! A round where some attendee has no permitted country left fails the whole
//! run with [`SweepstakeError::AllocationExhausted`]. Picks are staged and
//! only applied once the round completes, so a failed round leaves no
//! increments behind.

use crate::attendee::Attendee;
use crate::country::CountryCatalog;
use crate::error::{Result, SweepstakeError};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// Redraw attempts per pick, as a multiple of the remaining pool size
const REDRAW_LIMIT_FACTOR: usize = 16;

/// One attendee's country for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick<'a> {
    /// Index into the attendee slice (after the run-start shuffle)
    pub attendee: usize,
    pub country: &'a str,
}

/// Hook called after every completed round
pub trait RoundObserver {
    /// `round` is zero-based; `picks` are in draw order.
    fn on_round(&mut self, round: usize, attendees: &[Attendee], picks: &[Pick<'_>]);
}

impl RoundObserver for () {
    fn on_round(&mut self, _round: usize, _attendees: &[Attendee], _picks: &[Pick<'_>]) {}
}

/// Logs every pick at trace level
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RoundObserver for TracingObserver {
    fn on_round(&mut self, round: usize, attendees: &[Attendee], picks: &[Pick<'_>]) {
        for pick in picks {
            trace!(
                "round {}: {} -> {}",
                round + 1,
                attendees[pick.attendee].name(),
                pick.country
            );
        }
    }
}

/// Counters gathered over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Rounds completed
    pub rounds: usize,
    /// Random draws made, including rejected ones
    pub draws: u64,
    /// Draws thrown back because the country was excluded
    pub rejected: u64,
}

/// Run `rounds` allocation passes over `attendees`
///
/// The slice is shuffled in place once; the caller sees the draw order
/// afterwards.
pub fn allocate<R>(
    attendees: &mut [Attendee],
    catalog: &CountryCatalog,
    rounds: usize,
    rng: &mut R,
) -> Result<AllocationStats>
where
    R: Rng + ?Sized,
{
    allocate_observed(attendees, catalog, rounds, rng, &mut ())
}

/// [`allocate`] with a [`RoundObserver`] notified after every round
pub fn allocate_observed<R, O>(
    attendees: &mut [Attendee],
    catalog: &CountryCatalog,
    rounds: usize,
    rng: &mut R,
    observer: &mut O,
) -> Result<AllocationStats>
where
    R: Rng + ?Sized,
    O: RoundObserver + ?Sized,
{
    debug!(
        "Allocating {} countries among {} attendees over {} rounds",
        catalog.len(),
        attendees.len(),
        rounds
    );

    attendees.shuffle(rng);

    let mut stats = AllocationStats::default();
    let mut picks = Vec::with_capacity(attendees.len());
    let mut remaining: Vec<&str> = Vec::with_capacity(catalog.len());

    for round in 0..rounds {
        remaining.clear();
        remaining.extend(catalog.iter());
        picks.clear();

        for (index, attendee) in attendees.iter().enumerate() {
            let Some(slot) = draw(&remaining, attendee, rng, &mut stats) else {
                debug!(
                    "Round {} exhausted for {} with {} countries left",
                    round + 1,
                    attendee.name(),
                    remaining.len()
                );
                return Err(SweepstakeError::AllocationExhausted {
                    round: round + 1,
                    attendee: attendee.name().to_string(),
                });
            };
            picks.push(Pick {
                attendee: index,
                country: remaining.swap_remove(slot),
            });
        }

        for pick in &picks {
            attendees[pick.attendee].increment(pick.country);
        }
        observer.on_round(round, attendees, &picks);
        stats.rounds += 1;
    }

    debug!(
        "Allocation finished: {} rounds, {} draws, {} rejected",
        stats.rounds, stats.draws, stats.rejected
    );
    Ok(stats)
}

/// Index into `remaining` of a country `attendee` may take, or `None` if
/// every remaining country is excluded for them
fn draw<R>(
    remaining: &[&str],
    attendee: &Attendee,
    rng: &mut R,
    stats: &mut AllocationStats,
) -> Option<usize>
where
    R: Rng + ?Sized,
{
    let permitted = remaining
        .iter()
        .filter(|token| !attendee.is_excluded(token))
        .count();
    if permitted == 0 {
        return None;
    }

    for _ in 0..remaining.len() * REDRAW_LIMIT_FACTOR {
        stats.draws += 1;
        let slot = rng.gen_range(0..remaining.len());
        if !attendee.is_excluded(remaining[slot]) {
            return Some(slot);
        }
        stats.rejected += 1;
    }

    let nth = rng.gen_range(0..permitted);
    remaining
        .iter()
        .enumerate()
        .filter(|(_, token)| !attendee.is_excluded(token))
        .nth(nth)
        .map(|(slot, _)| slot)
}

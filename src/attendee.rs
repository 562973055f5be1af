//! Attendee record: per-country hit counters and an exclusion set

use crate::country::CountryCatalog;
use std::collections::{HashMap, HashSet};

/// One person at the party
///
/// Counters exist for every catalog token from creation, start at zero and
/// only ever grow through [`Attendee::increment`]. The tracked order is the
/// catalog order, followed by any token first seen through `increment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    name: String,
    order: Vec<String>,
    hit_counts: HashMap<String, u64>,
    excluded: HashSet<String>,
}

impl Attendee {
    /// Create an attendee with zeroed counters for every catalog token
    ///
    /// `excluded` must already be in token form.
    pub fn new<I, S>(name: impl Into<String>, catalog: &CountryCatalog, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Vec::with_capacity(catalog.len());
        let mut hit_counts = HashMap::with_capacity(catalog.len());
        for token in catalog.iter() {
            if hit_counts.insert(token.to_string(), 0).is_none() {
                order.push(token.to_string());
            }
        }

        Self {
            name: name.into(),
            order,
            hit_counts,
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record one more hit for `token`; unknown tokens start at 1
    pub fn increment(&mut self, token: &str) {
        match self.hit_counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.order.push(token.to_string());
                self.hit_counts.insert(token.to_string(), 1);
            }
        }
    }

    /// Hits for `token`, zero if it was never tracked
    pub fn count(&self, token: &str) -> u64 {
        self.hit_counts.get(token).copied().unwrap_or(0)
    }

    /// Token with the strictly greatest count
    ///
    /// Ties go to the token tracked first (catalog order). Returns
    /// `("", 0)` when every counter is zero.
    pub fn top_country(&self) -> (String, u64) {
        let mut best = ("", 0);
        for (token, count) in self.counts() {
            if count > best.1 {
                best = (token, count);
            }
        }
        (best.0.to_string(), best.1)
    }

    /// `(token, count)` pairs in tracked order
    pub fn counts(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order
            .iter()
            .map(move |token| (token.as_str(), self.count(token)))
    }

    /// Sum of every counter
    pub fn total_hits(&self) -> u64 {
        self.hit_counts.values().sum()
    }

    pub fn is_excluded(&self, token: &str) -> bool {
        self.excluded.contains(token)
    }

    pub fn excluded(&self) -> &HashSet<String> {
        &self.excluded
    }
}

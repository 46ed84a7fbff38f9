//! Weight tables for the commit-count draw.
//!
//! Two independently tuned heuristics exist: one for bulk backfills and one
//! for natural-pattern generation. They disagree on weekends and are kept as
//! separate named policies.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Total every normalized table sums to.
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Largest per-date cap a table is ever expanded to.
pub const MAX_DAILY_COMMITS: u32 = 100;

/// Profile average below 1: mostly idle.
pub const SPARSE_PROFILE_WEIGHTS: [f64; 2] = [80.0, 20.0];

/// Profile average in `[1, 2)`: usually one commit.
pub const LIGHT_PROFILE_WEIGHTS: [f64; 3] = [20.0, 60.0, 20.0];

/// Where in the week a date falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayClass {
    /// Saturday or Sunday
    Weekend,
    /// Monday or Friday
    Edge,
    /// Tuesday through Thursday
    Core,
}

impl DayClass {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayClass::Weekend,
            Weekday::Mon | Weekday::Fri => DayClass::Edge,
            _ => DayClass::Core,
        }
    }
}

/// Highest bucket a table may reach, relative to the daily cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ceiling {
    /// Up to the daily cap
    Cap,
    /// Up to a fixed count, never above the cap
    AtMost(u32),
    /// A fixed amount below the cap
    CapMinus(u32),
}

impl Ceiling {
    pub fn resolve(self, cap: u32) -> u32 {
        match self {
            Ceiling::Cap => cap,
            Ceiling::AtMost(n) => n.min(cap),
            Ceiling::CapMinus(n) => cap.saturating_sub(n),
        }
    }
}

/// Relative weights for 0, 1, 2, ... commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    pub weights: &'static [f64],
    pub ceiling: Ceiling,
    /// Weight given to buckets past the end of `weights` up to the ceiling
    pub pad: Option<f64>,
}

impl WeightTable {
    /// Truncate (or pad) to the ceiling for `cap` and normalize to 100.
    ///
    /// `cap` is bounded by [`MAX_DAILY_COMMITS`].
    pub fn buckets(&self, cap: u32) -> Vec<f64> {
        let len = self.ceiling.resolve(cap.min(MAX_DAILY_COMMITS)) as usize + 1;
        let mut weights: Vec<f64> = self.weights.iter().copied().take(len).collect();
        if let Some(pad) = self.pad {
            weights.resize(len, pad);
        }
        normalize(&weights)
    }
}

/// A weight table per day class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPolicy {
    pub name: &'static str,
    pub weekend: WeightTable,
    pub edge: WeightTable,
    pub core: WeightTable,
}

impl WeightPolicy {
    pub fn table(&self, class: DayClass) -> &WeightTable {
        match class {
            DayClass::Weekend => &self.weekend,
            DayClass::Edge => &self.edge,
            DayClass::Core => &self.core,
        }
    }
}

/// Used for fixed-count backfills over a range or a list of gaps.
pub const BULK_POLICY: WeightPolicy = WeightPolicy {
    name: "bulk",
    weekend: WeightTable {
        weights: &[30.0, 60.0, 10.0],
        ceiling: Ceiling::Cap,
        pad: None,
    },
    edge: WeightTable {
        weights: &[0.0, 40.0, 40.0, 20.0],
        ceiling: Ceiling::AtMost(3),
        pad: None,
    },
    core: WeightTable {
        weights: &[0.0, 20.0, 30.0, 30.0, 15.0, 5.0],
        ceiling: Ceiling::AtMost(5),
        pad: None,
    },
};

/// Used for natural-pattern generation without a reference profile.
pub const NATURAL_POLICY: WeightPolicy = WeightPolicy {
    name: "natural",
    weekend: WeightTable {
        weights: &[50.0, 40.0, 10.0],
        ceiling: Ceiling::Cap,
        pad: None,
    },
    edge: WeightTable {
        weights: &[10.0, 30.0, 40.0, 15.0, 5.0],
        ceiling: Ceiling::CapMinus(2),
        pad: Some(1.0),
    },
    core: WeightTable {
        weights: &[5.0, 15.0, 30.0, 25.0, 15.0, 5.0, 3.0, 2.0],
        ceiling: Ceiling::Cap,
        pad: Some(1.0),
    },
};

/// Scale weights so they sum to [`WEIGHT_TOTAL`].
///
/// A table with no positive mass collapses onto bucket 0.
pub fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().filter(|w| w.is_finite() && **w > 0.0).sum();
    if total <= 0.0 {
        let mut collapsed = vec![0.0; weights.len().max(1)];
        collapsed[0] = WEIGHT_TOTAL;
        return collapsed;
    }
    weights
        .iter()
        .map(|w| {
            if w.is_finite() && *w > 0.0 {
                w * WEIGHT_TOTAL / total
            } else {
                0.0
            }
        })
        .collect()
}

/// Truncate a fixed table to `cap + 1` buckets and normalize it.
pub fn truncated(weights: &[f64], cap: u32) -> Vec<f64> {
    let len = cap as usize + 1;
    normalize(&weights[..weights.len().min(len)])
}

/// Weighted choice of a bucket index.
pub fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> u32 {
    match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng) as u32,
        Err(_) => 0,
    }
}

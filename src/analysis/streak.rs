use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::types::{ContributionDay, StreakSummary};
use crate::utils::DateRange;

/// Number of entries kept in [`StreakSummary::recent_window`].
pub const RECENT_WINDOW_DAYS: usize = 90;

/// Size of the trailing window scanned for missing days.
pub const MISSING_WINDOW_DAYS: u32 = 30;

/// Collapse the series to one entry per date, oldest first.
///
/// When a date appears more than once the later entry wins.
pub fn dedup_by_date(days: &[ContributionDay]) -> Vec<ContributionDay> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for day in days {
        by_date.insert(day.date, day.count);
    }
    by_date
        .into_iter()
        .map(|(date, count)| ContributionDay::new(date, count))
        .collect()
}

/// Derive streak and gap statistics from a contribution series.
///
/// The series may be in any order. Runs are counted over the entries that are
/// present: a zero-count entry ends a run, a date the source never reported
/// does not.
pub fn analyze_streak(days: &[ContributionDay], today: NaiveDate) -> StreakSummary {
    let ascending = dedup_by_date(days);
    let descending: Vec<ContributionDay> = ascending.iter().rev().copied().collect();

    StreakSummary {
        current_streak: current_streak(&descending),
        longest_streak: longest_streak(&ascending),
        missing_dates: missing_dates(&descending, today),
        last_active_date: descending.iter().find(|d| d.is_active()).map(|d| d.date),
        recent_window: descending.into_iter().take(RECENT_WINDOW_DAYS).collect(),
    }
}

fn current_streak(newest_first: &[ContributionDay]) -> u32 {
    newest_first.iter().take_while(|d| d.is_active()).count() as u32
}

fn longest_streak(oldest_first: &[ContributionDay]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for day in oldest_first {
        if day.is_active() {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

fn missing_dates(newest_first: &[ContributionDay], today: NaiveDate) -> Vec<NaiveDate> {
    let active: HashSet<NaiveDate> = newest_first
        .iter()
        .take(MISSING_WINDOW_DAYS as usize)
        .filter(|d| d.is_active())
        .map(|d| d.date)
        .collect();

    DateRange::trailing(today, MISSING_WINDOW_DAYS)
        .iter()
        .filter(|date| !active.contains(date))
        .collect()
}

//! # Common Types
//!
//! This module contains the common types shared by the analyzer, the schedule
//! generator and the commit executor: contribution samples, streak summaries,
//! activity profiles, schedules and execution results.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Weekday labels in profile order (Monday first).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One calendar day's activity count as reported by the calendar source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributionDay {
    /// The calendar day
    pub date: NaiveDate,
    /// Number of contributions recorded for the day
    pub count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Streak and gap statistics derived from a contribution series.
///
/// A summary is recomputed on every analysis call and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    /// Consecutive active entries counting back from the newest entry
    pub current_streak: u32,
    /// Longest run of active entries anywhere in the series
    pub longest_streak: u32,
    /// Days of the trailing 30-day window without activity, oldest first
    pub missing_dates: Vec<NaiveDate>,
    /// Most recent day with activity, if any
    pub last_active_date: Option<NaiveDate>,
    /// The most recent 90 entries, newest first
    pub recent_window: Vec<ContributionDay>,
}

/// Average activity per weekday, indexed Monday (0) through Sunday (6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActivityProfile {
    pub per_weekday: [f64; 7],
}

impl ActivityProfile {
    pub fn new(per_weekday: [f64; 7]) -> Self {
        Self { per_weekday }
    }

    /// Average for a weekday index (`0` = Monday).
    pub fn average(&self, weekday_index: usize) -> f64 {
        self.per_weekday.get(weekday_index).copied().unwrap_or(0.0)
    }
}

/// How many synthetic commits to create on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub commit_count: u32,
    /// Explicit time of day to reuse for every commit on this date
    pub time: Option<NaiveTime>,
}

impl DayPlan {
    pub fn new(date: NaiveDate, commit_count: u32) -> Self {
        Self {
            date,
            commit_count,
            time: None,
        }
    }

    /// A plan pinned to an explicit time of day.
    pub fn at(date: NaiveDate, time: NaiveTime, commit_count: u32) -> Self {
        Self {
            date,
            commit_count,
            time: Some(time),
        }
    }

    pub fn is_active(&self) -> bool {
        self.commit_count > 0
    }
}

/// Aggregate numbers describing a generated schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub total_days: usize,
    pub active_days: usize,
    pub total_commits: u64,
}

impl ScheduleSummary {
    pub fn active_ratio(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.active_days as f64 / self.total_days as f64
        }
    }

    pub fn commits_per_day(&self) -> f64 {
        if self.total_days == 0 {
            0.0
        } else {
            self.total_commits as f64 / self.total_days as f64
        }
    }
}

/// A per-date plan of synthetic commits, ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    days: Vec<DayPlan>,
}

impl DaySchedule {
    /// Build a schedule; plans are sorted by date.
    pub fn new(mut days: Vec<DayPlan>) -> Self {
        days.sort_by_key(|d| d.date);
        Self { days }
    }

    pub fn days(&self) -> &[DayPlan] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Plans with at least one commit, in date order.
    pub fn active_days(&self) -> impl Iterator<Item = &DayPlan> {
        self.days.iter().filter(|d| d.is_active())
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            total_days: self.days.len(),
            active_days: self.active_days().count(),
            total_commits: self.days.iter().map(|d| d.commit_count as u64).sum(),
        }
    }
}

/// A single synthetic commit, ready to be applied to the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub date: NaiveDate,
    /// Used as both author and committer time
    pub timestamp: NaiveDateTime,
    /// Path relative to the working copy root
    pub file_path: String,
    pub content: String,
    pub message: String,
}

/// Whether a date's batch was pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PushStatus {
    NotRequested,
    Pushed,
    Failed,
}

/// What happened to one date's batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOutcome {
    /// Commits scheduled for the date
    pub planned: u32,
    /// Commits actually created locally
    pub committed: u32,
    pub push: PushStatus,
    /// First error that stopped the batch, if any
    pub error: Option<String>,
}

impl DayOutcome {
    /// All planned commits landed and, if requested, the push went through.
    pub fn success(&self) -> bool {
        self.error.is_none() && self.committed == self.planned && self.push != PushStatus::Failed
    }
}

/// Per-date results of a batch run, keyed and ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    outcomes: BTreeMap<NaiveDate, DayOutcome>,
    /// Dates that had nothing scheduled; not counted as outcomes
    skipped: BTreeSet<NaiveDate>,
}

impl ExecutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, outcome: DayOutcome) {
        self.outcomes.insert(date, outcome);
    }

    pub fn record_skipped(&mut self, date: NaiveDate) {
        self.skipped.insert(date);
    }

    /// Dates passed over because zero commits were planned for them.
    pub fn skipped(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.skipped.iter().copied()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn outcome(&self, date: NaiveDate) -> Option<&DayOutcome> {
        self.outcomes.get(&date)
    }

    /// The per-date success flag, `None` when the date was not processed.
    pub fn success(&self, date: NaiveDate) -> Option<bool> {
        self.outcomes.get(&date).map(DayOutcome::success)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayOutcome)> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.values().filter(|o| o.success()).count()
    }

    pub fn failed_dates(&self) -> Vec<NaiveDate> {
        self.outcomes
            .iter()
            .filter(|(_, o)| !o.success())
            .map(|(d, _)| *d)
            .collect()
    }

    /// Collapse to the plain date → success map.
    pub fn to_map(&self) -> BTreeMap<NaiveDate, bool> {
        self.outcomes
            .iter()
            .map(|(d, o)| (*d, o.success()))
            .collect()
    }
}

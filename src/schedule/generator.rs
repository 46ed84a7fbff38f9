use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use super::weights::{
    sample_weighted, truncated, DayClass, WeightPolicy, BULK_POLICY, LIGHT_PROFILE_WEIGHTS,
    MAX_DAILY_COMMITS, NATURAL_POLICY, SPARSE_PROFILE_WEIGHTS,
};
use crate::types::{ActivityProfile, DayPlan, DaySchedule};
use crate::utils::DateRange;

/// Which heuristic drives the draw when no reference profile is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// Backfill with a fixed per-date count, randomized by weekday
    Bulk,
    /// Natural-looking pattern over a date range
    Natural,
}

impl ScheduleMode {
    pub fn policy(self) -> &'static WeightPolicy {
        match self {
            ScheduleMode::Bulk => &BULK_POLICY,
            ScheduleMode::Natural => &NATURAL_POLICY,
        }
    }
}

/// Turns dates into a per-day commit plan.
///
/// Every count lies in `0..=max_daily_commits`, and the cap itself never
/// exceeds [`MAX_DAILY_COMMITS`]. Randomness is supplied by the caller, so a
/// seeded generator yields reproducible schedules.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    mode: ScheduleMode,
    max_daily_commits: u32,
    profile: Option<ActivityProfile>,
}

impl ScheduleGenerator {
    pub fn new(mode: ScheduleMode, max_daily_commits: u32) -> Self {
        if max_daily_commits > MAX_DAILY_COMMITS {
            warn!(
                "Daily cap {} exceeds {}; using {}",
                max_daily_commits, MAX_DAILY_COMMITS, MAX_DAILY_COMMITS
            );
        }
        Self {
            mode,
            max_daily_commits: max_daily_commits.min(MAX_DAILY_COMMITS),
            profile: None,
        }
    }

    /// Calibrate the draw against a reference profile instead of the heuristic tables.
    pub fn with_profile(mut self, profile: ActivityProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    pub fn max_daily_commits(&self) -> u32 {
        self.max_daily_commits
    }

    pub fn profile(&self) -> Option<&ActivityProfile> {
        self.profile.as_ref()
    }

    /// Plan every date of an inclusive range.
    pub fn generate<R: Rng + ?Sized>(&self, range: &DateRange, rng: &mut R) -> DaySchedule {
        let days = range
            .iter()
            .map(|date| DayPlan::new(date, self.commits_for(date, rng)))
            .collect();
        DaySchedule::new(days)
    }

    /// Plan an arbitrary set of dates. Duplicates are planned once.
    pub fn generate_for_dates<R: Rng + ?Sized>(&self, dates: &[NaiveDate], rng: &mut R) -> DaySchedule {
        let mut dates = dates.to_vec();
        dates.sort();
        dates.dedup();

        let days = dates
            .into_iter()
            .map(|date| DayPlan::new(date, self.commits_for(date, rng)))
            .collect();
        DaySchedule::new(days)
    }

    /// Draw the number of commits for one date.
    pub fn commits_for<R: Rng + ?Sized>(&self, date: NaiveDate, rng: &mut R) -> u32 {
        let count = match &self.profile {
            Some(profile) => {
                let weekday = date.weekday().num_days_from_monday() as usize;
                self.draw_from_average(profile.average(weekday), rng)
            }
            None => self.draw_from_policy(DayClass::of(date), rng),
        };
        debug!("{}: {} commits planned", date, count);
        count.min(self.max_daily_commits)
    }

    fn draw_from_average<R: Rng + ?Sized>(&self, avg: f64, rng: &mut R) -> u32 {
        let cap = self.max_daily_commits;
        if avg < 1.0 {
            return sample_weighted(&truncated(&SPARSE_PROFILE_WEIGHTS, cap), rng);
        }
        if avg < 2.0 {
            return sample_weighted(&truncated(&LIGHT_PROFILE_WEIGHTS, cap), rng);
        }

        let std_dev = (avg / 2.0).max(1.0);
        let drawn = match Normal::new(avg, std_dev) {
            Ok(normal) => normal.sample(rng),
            Err(_) => avg,
        };
        drawn.round().clamp(0.0, f64::from(cap)) as u32
    }

    fn draw_from_policy<R: Rng + ?Sized>(&self, class: DayClass, rng: &mut R) -> u32 {
        let buckets = self
            .mode
            .policy()
            .table(class)
            .buckets(self.max_daily_commits);
        sample_weighted(&buckets, rng)
    }
}

use chrono::{Duration, NaiveDate};
use log::{info, warn};
use rand::Rng;

use crate::analysis::{analyze_streak, build_activity_profile};
use crate::github::{CalendarSource, Result};
use crate::schedule::{ScheduleGenerator, ScheduleMode};
use crate::types::{ActivityProfile, DaySchedule, StreakSummary};
use crate::utils::DateRange;

/// Bounds of the per-date cap drawn for a gap fill.
pub const FILL_CAP_RANGE: (u32, u32) = (5, 10);

/// Ties a calendar source to the analyzer and schedule generator.
///
/// Remote failures surface as errors except during reference calibration,
/// which falls back to the heuristic tables.
pub struct StreakManager<S: CalendarSource> {
    source: S,
}

/// A gap-fill plan: the dates that were missing and what to do about them.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPlan {
    pub missing: Vec<NaiveDate>,
    pub max_daily_commits: u32,
    pub schedule: DaySchedule,
}

impl FillPlan {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl<S: CalendarSource> StreakManager<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Streak statistics for `handle`, or the authenticated account.
    pub async fn analyze(&self, handle: Option<&str>, today: NaiveDate) -> Result<StreakSummary> {
        let days = self.source.fetch_calendar(handle).await?;
        info!("Fetched {} contribution days", days.len());
        Ok(analyze_streak(&days, today))
    }

    /// Weekday profile of a reference account, or `None` if it cannot be fetched.
    pub async fn reference_profile(&self, handle: &str, max_daily_commits: u32, today: NaiveDate) -> Option<ActivityProfile> {
        info!("Analyzing commit pattern of GitHub user: {}", handle);
        match self.analyze(Some(handle), today).await {
            Ok(summary) => Some(build_activity_profile(&summary.recent_window, max_daily_commits)),
            Err(e) => {
                warn!("Error analyzing reference user {}: {}; using default activity pattern", handle, e);
                None
            }
        }
    }

    /// Generator for the natural pipeline, calibrated when a reference is given.
    pub async fn natural_generator(
        &self,
        reference: Option<&str>,
        max_daily_commits: u32,
        today: NaiveDate,
    ) -> ScheduleGenerator {
        let generator = ScheduleGenerator::new(ScheduleMode::Natural, max_daily_commits);
        let profile = match reference {
            Some(handle) => self.reference_profile(handle, max_daily_commits, today).await,
            None => None,
        };
        match profile {
            Some(profile) => generator.with_profile(profile),
            None => generator,
        }
    }

    /// Plan commits for the authenticated account's recent gaps.
    ///
    /// Only missing dates on or after `today - days_back` are kept. A window
    /// reaching past the earliest representable date keeps every gap.
    pub async fn fill_plan<R: Rng + ?Sized>(&self, today: NaiveDate, days_back: u32, rng: &mut R) -> Result<FillPlan> {
        let summary = self.analyze(None, today).await?;
        let cutoff = today
            .checked_sub_signed(Duration::days(i64::from(days_back)))
            .unwrap_or(NaiveDate::MIN);
        let missing: Vec<NaiveDate> = summary
            .missing_dates
            .into_iter()
            .filter(|d| *d >= cutoff)
            .collect();

        let (low, high) = FILL_CAP_RANGE;
        let max_daily_commits = rng.gen_range(low..=high);
        let schedule = ScheduleGenerator::new(ScheduleMode::Bulk, max_daily_commits).generate_for_dates(&missing, rng);

        Ok(FillPlan {
            missing,
            max_daily_commits,
            schedule,
        })
    }
}

/// Generator for the bulk pipeline, where the fixed per-date count is the cap.
pub fn bulk_generator(count: u32) -> ScheduleGenerator {
    ScheduleGenerator::new(ScheduleMode::Bulk, count)
}

/// Plan a date range with `generator`.
pub fn plan_range<R: Rng + ?Sized>(generator: &ScheduleGenerator, range: &DateRange, rng: &mut R) -> DaySchedule {
    let schedule = generator.generate(range, rng);
    info!(
        "Generated {:?} schedule from {} to {}: {} active of {} days",
        generator.mode(),
        range.start(),
        range.end(),
        schedule.active_days().count(),
        schedule.len()
    );
    schedule
}

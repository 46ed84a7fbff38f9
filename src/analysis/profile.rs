use chrono::Datelike;

use crate::types::{ActivityProfile, ContributionDay};

/// Average contributions per weekday, each capped at `max_daily_commits`.
///
/// Weekdays with no samples stay at zero.
pub fn build_activity_profile(samples: &[ContributionDay], max_daily_commits: u32) -> ActivityProfile {
    let mut totals = [0u64; 7];
    let mut counts = [0u32; 7];

    for day in samples {
        let idx = day.date.weekday().num_days_from_monday() as usize;
        totals[idx] += u64::from(day.count);
        counts[idx] += 1;
    }

    let cap = f64::from(max_daily_commits);
    let mut per_weekday = [0.0; 7];
    for (idx, avg) in per_weekday.iter_mut().enumerate() {
        if counts[idx] > 0 {
            *avg = totals[idx] as f64 / f64::from(counts[idx]);
        }
        *avg = avg.min(cap);
    }

    ActivityProfile::new(per_weekday)
}

use super::*;
use crate::types::ContributionDay;
use crate::utils::DateRange;
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn day(date: &str, count: u32) -> ContributionDay {
    ContributionDay::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), count)
}

/// A contiguous series ending at `end`, oldest first.
fn series_ending(end: NaiveDate, counts: &[u32]) -> Vec<ContributionDay> {
    let len = counts.len() as i64;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ContributionDay::new(end - Duration::days(len - 1 - i as i64), count))
        .collect()
}

#[test]
fn test_current_and_longest_streak() {
    let days = vec![
        day("2024-01-05", 1),
        day("2024-01-04", 1),
        day("2024-01-03", 0),
        day("2024-01-02", 1),
    ];

    let summary = analyze_streak(&days, ymd(2024, 1, 5));
    assert_eq!(summary.current_streak, 2);
    assert_eq!(summary.longest_streak, 2);
    assert_eq!(summary.last_active_date, Some(ymd(2024, 1, 5)));
}

#[test]
fn test_empty_series() {
    let summary = analyze_streak(&[], ymd(2024, 1, 5));
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.longest_streak, 0);
    assert_eq!(summary.last_active_date, None);
    assert!(summary.recent_window.is_empty());
    // Nothing reported means every day of the window is missing
    assert_eq!(summary.missing_dates.len(), MISSING_WINDOW_DAYS as usize);
}

#[test]
fn test_input_order_does_not_matter() {
    let ordered = vec![
        day("2024-01-02", 1),
        day("2024-01-03", 0),
        day("2024-01-04", 1),
        day("2024-01-05", 1),
    ];
    let shuffled = vec![ordered[2], ordered[0], ordered[3], ordered[1]];
    let today = ymd(2024, 1, 5);

    assert_eq!(analyze_streak(&ordered, today), analyze_streak(&shuffled, today));
}

#[test]
fn test_zero_today_breaks_current_streak() {
    let days = series_ending(ymd(2024, 3, 10), &[1, 2, 3, 0]);
    let summary = analyze_streak(&days, ymd(2024, 3, 10));

    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.longest_streak, 3);
    assert_eq!(summary.last_active_date, Some(ymd(2024, 3, 9)));
}

#[test]
fn test_calendar_gap_does_not_end_a_run() {
    // Jan 3 is absent from the series entirely
    let days = vec![day("2024-01-01", 2), day("2024-01-02", 1), day("2024-01-04", 5)];
    let summary = analyze_streak(&days, ymd(2024, 1, 4));

    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.longest_streak, 3);
}

#[test]
fn test_duplicate_dates_later_entry_wins() {
    let days = vec![day("2024-01-01", 1), day("2024-01-02", 3), day("2024-01-02", 0)];
    let deduped = dedup_by_date(&days);

    assert_eq!(deduped, vec![day("2024-01-01", 1), day("2024-01-02", 0)]);

    let summary = analyze_streak(&days, ymd(2024, 1, 2));
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.longest_streak, 1);
}

#[test]
fn test_missing_dates_in_trailing_window() {
    let today = ymd(2024, 6, 30);
    // 40 active days, except two recent gaps
    let mut counts = vec![1; 40];
    counts[39] = 0; // today
    counts[35] = 0; // four days ago
    let days = series_ending(today, &counts);

    let summary = analyze_streak(&days, today);
    assert_eq!(summary.missing_dates, vec![ymd(2024, 6, 26), ymd(2024, 6, 30)]);
}

#[test]
fn test_missing_dates_include_days_not_reported() {
    let today = ymd(2024, 6, 30);
    // Series stops five days before today
    let days = series_ending(ymd(2024, 6, 25), &[1; 60]);

    let summary = analyze_streak(&days, today);
    assert_eq!(
        summary.missing_dates,
        vec![
            ymd(2024, 6, 26),
            ymd(2024, 6, 27),
            ymd(2024, 6, 28),
            ymd(2024, 6, 29),
            ymd(2024, 6, 30),
        ]
    );
}

#[test]
fn test_missing_dates_stay_inside_window() {
    let mut rng = StdRng::seed_from_u64(7);
    let today = ymd(2024, 12, 31);
    let window = DateRange::trailing(today, MISSING_WINDOW_DAYS);

    for _ in 0..20 {
        let counts: Vec<u32> = (0..400).map(|_| rng.gen_range(0..3)).collect();
        let end = today - Duration::days(rng.gen_range(0..10));
        let summary = analyze_streak(&series_ending(end, &counts), today);

        assert!(summary.missing_dates.iter().all(|d| window.contains(*d)));
        assert!(summary.missing_dates.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_recent_window_is_newest_ninety() {
    let today = ymd(2024, 6, 30);
    let days = series_ending(today, &[1; 120]);
    let summary = analyze_streak(&days, today);

    assert_eq!(summary.recent_window.len(), RECENT_WINDOW_DAYS);
    assert_eq!(summary.recent_window[0].date, today);
    assert_eq!(summary.recent_window[89].date, today - Duration::days(89));
}

#[test]
fn test_analysis_is_idempotent() {
    let days = series_ending(ymd(2024, 5, 1), &[0, 1, 1, 0, 2, 3, 1, 0, 0, 4]);
    let today = ymd(2024, 5, 1);
    assert_eq!(analyze_streak(&days, today), analyze_streak(&days, today));
}

#[test]
fn test_longest_streak_dominates_prefixes() {
    let mut rng = StdRng::seed_from_u64(42);
    let end = ymd(2024, 8, 1);
    let counts: Vec<u32> = (0..200).map(|_| rng.gen_range(0..2)).collect();
    let days = series_ending(end, &counts);
    let full = analyze_streak(&days, end);

    for cut in 1..days.len() {
        let prefix = &days[..cut];
        let partial = analyze_streak(prefix, prefix[cut - 1].date);
        assert!(full.longest_streak >= partial.longest_streak);
        assert!(full.longest_streak >= partial.current_streak);
    }
}

#[test]
fn test_profile_averages_per_weekday() {
    // 2024-01-01 is a Monday
    let days = vec![
        day("2024-01-01", 2),
        day("2024-01-08", 4),
        day("2024-01-02", 1),
        day("2024-01-06", 0),
        day("2024-01-07", 5),
    ];

    let profile = build_activity_profile(&days, 10);
    assert_eq!(profile.per_weekday, [3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
}

#[test]
fn test_profile_clamps_to_cap() {
    let days = vec![day("2024-01-03", 30), day("2024-01-10", 10)];
    let profile = build_activity_profile(&days, 8);

    assert_eq!(profile.average(2), 8.0);
    assert!(profile.per_weekday.iter().all(|v| *v >= 0.0 && *v <= 8.0));
}

#[test]
fn test_profile_of_empty_sample_is_zero() {
    let profile = build_activity_profile(&[], 8);
    assert_eq!(profile.per_weekday, [0.0; 7]);
}

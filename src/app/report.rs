//! Plain-text reports printed by the command line front end.

use std::fmt::Write;

use crate::github::RepositoryInfo;
use crate::types::{ActivityProfile, ExecutionResult, PushStatus, ScheduleSummary, StreakSummary, WEEKDAY_NAMES};

/// Missing dates listed before the report collapses the rest into a count.
pub const MISSING_DATES_SHOWN: usize = 10;

/// Repositories listed by the suggestion report.
pub const REPOSITORIES_SHOWN: usize = 10;

pub fn analysis_report(summary: &StreakSummary) -> String {
    let mut out = String::new();
    let last = summary
        .last_active_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "never".to_string());

    let _ = writeln!(out, "Current streak: {} days", summary.current_streak);
    let _ = writeln!(out, "Longest streak: {} days", summary.longest_streak);
    let _ = writeln!(out, "Last commit: {}", last);

    if summary.missing_dates.is_empty() {
        let _ = writeln!(out, "No missing dates in your recent history.");
        return out;
    }

    let _ = writeln!(out, "Missing dates in your recent history:");
    for date in summary.missing_dates.iter().take(MISSING_DATES_SHOWN) {
        let _ = writeln!(out, "- {}", date);
    }
    if summary.missing_dates.len() > MISSING_DATES_SHOWN {
        let _ = writeln!(out, "... and {} more", summary.missing_dates.len() - MISSING_DATES_SHOWN);
    }
    out
}

pub fn schedule_report(summary: &ScheduleSummary) -> String {
    format!(
        "  - {} total days, {} active days ({:.1}%)\n  - {} total commits, {:.1} commits per day average\n",
        summary.total_days,
        summary.active_days,
        summary.active_ratio() * 100.0,
        summary.total_commits,
        summary.commits_per_day()
    )
}

pub fn profile_report(profile: &ActivityProfile) -> String {
    let mut out = String::from("Reference user activity pattern per day of week:\n");
    for (name, avg) in WEEKDAY_NAMES.iter().zip(profile.per_weekday.iter()) {
        let _ = writeln!(out, "  {}: {:.1} commits on average", name, avg);
    }
    out
}

/// One line per executed date followed by a success tally.
pub fn execution_report(result: &ExecutionResult) -> String {
    let mut out = String::new();
    for (date, outcome) in result.iter() {
        let push = match outcome.push {
            PushStatus::NotRequested => "",
            PushStatus::Pushed => ", pushed",
            PushStatus::Failed => ", push failed",
        };
        let status = if outcome.success() { "ok" } else { "FAILED" };
        let _ = write!(
            out,
            "{} {}: {}/{} commits{}",
            date, status, outcome.committed, outcome.planned, push
        );
        if let Some(error) = &outcome.error {
            let _ = write!(out, " ({})", error);
        }
        out.push('\n');
    }
    if result.skipped_count() > 0 {
        let _ = writeln!(out, "Skipped {} dates with no commits scheduled", result.skipped_count());
    }
    let _ = writeln!(
        out,
        "Successfully backdated {}/{} dates",
        result.succeeded(),
        result.len()
    );
    out
}

pub fn repositories_report(repos: &[RepositoryInfo]) -> String {
    if repos.is_empty() {
        return "No matching repositories found.\n".to_string();
    }
    let mut out = String::from("Available repositories (oldest first):\n");
    for (i, repo) in repos.iter().take(REPOSITORIES_SHOWN).enumerate() {
        let language = repo.language.as_deref().unwrap_or("unknown");
        let _ = writeln!(
            out,
            "{}. {} [{}] (Last updated: {})",
            i + 1,
            repo.name,
            language,
            repo.updated_at.format("%Y-%m-%d")
        );
    }
    out
}

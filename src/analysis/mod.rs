pub mod profile;
pub mod streak;

#[cfg(test)]
mod tests;

pub use profile::build_activity_profile;
pub use streak::{analyze_streak, dedup_by_date, MISSING_WINDOW_DAYS, RECENT_WINDOW_DAYS};

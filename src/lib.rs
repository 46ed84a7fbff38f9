//! # Contribution Streak Library
//!
//! `gitstreak` analyzes a GitHub contribution calendar and backfills it with a
//! natural-looking history of backdated commits in a local repository.
//!
//! ## Features
//!
//! - Current and longest streak, last active day and recent gaps
//! - Weekday activity profiles calibrated from a reference account
//! - Seeded, testable schedule generation in bulk and natural modes
//! - Per-date commit execution through libgit2 with optional pushes
//!
//! ## Example
//!
//! ```no_run
//! use gitstreak::{ScheduleGenerator, ScheduleMode};
//! use gitstreak::utils::DateRange;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let schedule = ScheduleGenerator::new(ScheduleMode::Natural, 8).generate(&range, &mut rng);
//! println!("{} commits planned", schedule.summary().total_commits);
//! ```

pub mod analysis;
pub mod app;
pub mod cli;
pub mod commit;
pub mod config;
pub mod github;
pub mod schedule;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{analyze_streak, build_activity_profile};
pub use app::StreakManager;
pub use commit::{CommitBatchExecutor, GitRepository, VersionControl};
pub use github::{CalendarSource, GitHubClient};
pub use schedule::{ScheduleGenerator, ScheduleMode};
pub use types::{ActivityProfile, ContributionDay, DaySchedule, ExecutionResult, StreakSummary};

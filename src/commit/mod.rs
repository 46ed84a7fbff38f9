//! # Commit Execution
//!
//! Materializes a [`DaySchedule`](crate::types::DaySchedule) as backdated
//! commits: picks files, synthesizes their content and messages, draws commit
//! times and drives a [`VersionControl`] implementation one date at a time.

pub mod catalog;
pub mod content;
pub mod executor;
pub mod messages;
pub mod vcs;

pub use executor::{commit_timestamp, plan_commits, BackdateRequest, CommitBatchExecutor, Pacing};
pub use vcs::{GitRepository, VcsError, VersionControl};

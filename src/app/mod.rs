//! # Application Layer
//!
//! Orchestration shared by the command line subcommands: fetching calendars,
//! calibrating generators, planning gap fills and rendering reports.

pub mod manager;
pub mod report;

pub use manager::{bulk_generator, plan_range, FillPlan, StreakManager, FILL_CAP_RANGE};

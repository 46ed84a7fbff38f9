//! # Schedule Generation
//!
//! Turns a date range, or an explicit list of dates, into a per-day commit
//! plan. Counts are drawn from a reference activity profile when one is
//! supplied and from weekday weight tables otherwise.

pub mod generator;
pub mod weights;

pub use generator::{ScheduleGenerator, ScheduleMode};
pub use weights::{DayClass, WeightPolicy, BULK_POLICY, MAX_DAILY_COMMITS, NATURAL_POLICY};

pub mod dates;

pub use dates::{parse_commit_date, parse_date, DateParseError, DateRange};

//! # GitHub Integration
//!
//! Contribution calendars and identity lookups against the GitHub REST and
//! GraphQL APIs. The rest of the crate only sees the [`CalendarSource`] trait.

mod client;

pub use client::{GitHubClient, RepositoryInfo, DEFAULT_API_URL};

use async_trait::async_trait;
use thiserror::Error;

use crate::types::ContributionDay;

/// Errors that can occur when querying GitHub.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Network, TLS or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status, e.g. a bad token.
    #[error("GitHub API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The GraphQL endpoint returned an `errors` array.
    #[error("GraphQL query error: {0}")]
    GraphQl(String),

    #[error("GitHub user '{0}' not found")]
    UserNotFound(String),

    #[error("missing GitHub token")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Where contribution calendars come from.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// About a year of daily contribution counts, oldest first.
    ///
    /// `None` means the authenticated account.
    async fn fetch_calendar(&self, handle: Option<&str>) -> Result<Vec<ContributionDay>>;

    /// Login of the authenticated account.
    async fn who_am_i(&self) -> Result<String>;
}

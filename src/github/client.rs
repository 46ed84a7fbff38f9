use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{CalendarSource, GitHubError, Result};
use crate::types::ContributionDay;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const CALENDAR_QUERY: &str = r#"
query($username: String!) {
  user(login: $username) {
    contributionsCollection {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// A repository owned by the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub private: bool,
}

#[derive(Deserialize)]
struct AuthenticatedUser {
    login: String,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlMessage>,
}

#[derive(Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Deserialize)]
struct CalendarData {
    user: Option<CalendarUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize)]
struct ContributionCalendar {
    weeks: Vec<CalendarWeek>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: NaiveDate,
    contribution_count: u32,
}

/// Token-authenticated GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(GitHubError::MissingToken);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("gitstreak/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token: token.trim().to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point the client at another API root (GitHub Enterprise, a mock server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn rest<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}/{}", self.api_url, endpoint);
        debug!("GET {}", url);
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        let url = format!("{}/graphql", self.api_url);
        let payload = serde_json::json!({ "query": query, "variables": variables });
        debug!("POST {}", url);
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(GitHubError::GraphQl(messages.join("; ")));
        }
        body.data
            .ok_or_else(|| GitHubError::GraphQl("response carried no data".to_string()))
    }

    /// Contribution calendar of `username`, oldest day first.
    pub async fn calendar_for(&self, username: &str) -> Result<Vec<ContributionDay>> {
        let data: CalendarData = self
            .graphql(CALENDAR_QUERY, serde_json::json!({ "username": username }))
            .await?;
        let user = data
            .user
            .ok_or_else(|| GitHubError::UserNotFound(username.to_string()))?;

        let mut days: Vec<ContributionDay> = user
            .contributions_collection
            .contribution_calendar
            .weeks
            .into_iter()
            .flat_map(|week| week.contribution_days)
            .map(|day| ContributionDay::new(day.date, day.contribution_count))
            .collect();
        days.sort_by_key(|d| d.date);
        Ok(days)
    }

    /// Repositories of the authenticated account.
    pub async fn list_repositories(&self) -> Result<Vec<RepositoryInfo>> {
        self.rest("user/repos?per_page=100").await
    }

    /// Repositories worth committing to, least recently updated first.
    pub async fn suggest_repositories(&self, language: Option<&str>) -> Result<Vec<RepositoryInfo>> {
        let mut repos = self.list_repositories().await?;
        if let Some(language) = language {
            repos.retain(|r| {
                r.language
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(language))
            });
        }
        repos.sort_by_key(|r| r.updated_at);
        Ok(repos)
    }
}

#[async_trait]
impl CalendarSource for GitHubClient {
    async fn fetch_calendar(&self, handle: Option<&str>) -> Result<Vec<ContributionDay>> {
        match handle {
            Some(username) => self.calendar_for(username).await,
            None => {
                let login = self.who_am_i().await?;
                self.calendar_for(&login).await
            }
        }
    }

    async fn who_am_i(&self) -> Result<String> {
        let user: AuthenticatedUser = self.rest("user").await?;
        Ok(user.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(matches!(GitHubClient::new("  "), Err(GitHubError::MissingToken)));
    }

    #[test]
    fn test_api_url_trailing_slash_is_trimmed() {
        let client = GitHubClient::new("ghp_example").unwrap().with_api_url("http://localhost:9999/");
        assert_eq!(client.api_url(), "http://localhost:9999");
    }

    #[test]
    fn test_calendar_payload_shape() {
        let payload = r#"{
            "data": {"user": {"contributionsCollection": {"contributionCalendar": {"weeks": [
                {"contributionDays": [{"date": "2024-01-07", "contributionCount": 2}]}
            ]}}}}
        }"#;
        let parsed: GraphQlResponse<CalendarData> = serde_json::from_str(payload).unwrap();
        let user = parsed.data.unwrap().user.unwrap();
        let day = &user.contributions_collection.contribution_calendar.weeks[0].contribution_days[0];
        assert_eq!(day.contribution_count, 2);
        assert!(parsed.errors.is_empty());
    }
}

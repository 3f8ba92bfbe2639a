use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ApiError;

/// Contribution calendar as served by the community contributions API:
/// per-year totals plus one record per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub total: HashMap<String, u64>,
    pub contributions: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket 0..=4, as rendered by the upstream calendar.
    pub level: u8,
}

impl ContributionCalendar {
    pub fn total_contributions(&self) -> u64 {
        self.total.values().sum()
    }
}

/// Client for the contribution-calendar service. A separate host from the
/// GitHub API, with its own base URL in config.
#[derive(Clone)]
pub struct ContributionsClient {
    client: Client,
    api_url: String,
}

impl ContributionsClient {
    pub fn new(api_url: &str) -> Result<Self> {
        if !api_url.starts_with("https://") {
            bail!("Contributions API URL must use HTTPS: {}", api_url);
        }

        let client = Client::builder()
            .user_agent("quackhub")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_calendar(&self, username: &str) -> Result<ContributionCalendar, ApiError> {
        let url = format!("{}/{}", self.api_url, username);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { url, status, body });
        }

        let text = resp.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let calendar: ContributionCalendar =
            serde_json::from_str(&text).map_err(|source| ApiError::Decode { url, source })?;

        debug!(
            user = username,
            days = calendar.contributions.len(),
            "Fetched contribution calendar"
        );
        Ok(calendar)
    }
}

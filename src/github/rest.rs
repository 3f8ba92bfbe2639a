use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use super::error::ApiError;
use super::models::*;

/// Read-only client for the GitHub REST API. Unauthenticated; constructed
/// once at startup and handed to the orchestrator.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct ReadmeResponse {
    content: String,
}

impl GithubClient {
    pub fn new(api_url: &str) -> Result<Self> {
        if !api_url.starts_with("https://") {
            bail!("GitHub API URL must use HTTPS: {}", api_url);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .user_agent("quackhub")
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.api_url, path);

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let resp = request.send().await.map_err(|source| ApiError::Transport {
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

        serde_json::from_str(&text).map_err(|source| ApiError::Decode { url, source })
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<Profile, ApiError> {
        let profile: Profile = self.get_json(&format!("/users/{username}"), &[]).await?;
        debug!(login = %profile.login, "Fetched profile");
        Ok(profile)
    }

    /// First 100 repositories, newest first. No further pages are requested;
    /// everything downstream paginates client-side.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<Repository>, ApiError> {
        let repos: Vec<Repository> = self
            .get_json(
                &format!("/users/{username}/repos"),
                &[("per_page", "100"), ("sort", "created"), ("direction", "desc")],
            )
            .await?;
        debug!(user = username, count = repos.len(), "Fetched repositories");
        Ok(repos)
    }

    pub async fn fetch_events(&self, username: &str) -> Result<Vec<EventItem>, ApiError> {
        let events: Vec<EventItem> = self
            .get_json(&format!("/users/{username}/events/public"), &[])
            .await?;
        debug!(user = username, count = events.len(), "Fetched public events");
        Ok(events)
    }

    pub async fn fetch_gists(&self, username: &str) -> Result<Vec<Gist>, ApiError> {
        self.get_json(&format!("/users/{username}/gists"), &[]).await
    }

    pub async fn fetch_organizations(&self, username: &str) -> Result<Vec<Organization>, ApiError> {
        self.get_json(&format!("/users/{username}/orgs"), &[]).await
    }

    /// README for `owner/repo`, decoded from the API's base64 payload.
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, ApiError> {
        let readme: ReadmeResponse = self
            .get_json(&format!("/repos/{owner}/{repo}/readme"), &[])
            .await?;
        decode_readme(&readme.content)
    }

    pub async fn fetch_pulls(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>, ApiError> {
        let pulls: Vec<PullRequest> = self
            .get_json(&format!("/repos/{owner}/{repo}/pulls"), &[("state", "all")])
            .await?;
        debug!(repo = repo, count = pulls.len(), "Fetched pull requests");
        Ok(pulls)
    }

    pub async fn fetch_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, ApiError> {
        let issues: Vec<Issue> = self
            .get_json(&format!("/repos/{owner}/{repo}/issues"), &[("state", "all")])
            .await?;
        debug!(repo = repo, count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    pub async fn fetch_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/contributors"), &[])
            .await
    }

    /// Language byte totals for one repository, largest first.
    pub async fn fetch_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<LanguageSlice>, ApiError> {
        let raw: HashMap<String, u64> = self
            .get_json(&format!("/repos/{owner}/{repo}/languages"), &[])
            .await?;

        let mut slices: Vec<LanguageSlice> = raw
            .into_iter()
            .map(|(name, bytes)| LanguageSlice { name, bytes })
            .collect();
        slices.sort_by(|a, b| b.bytes.cmp(&a.bytes).then(a.name.cmp(&b.name)));
        Ok(slices)
    }

    pub async fn fetch_commits(&self, owner: &str, repo: &str) -> Result<Vec<Commit>, ApiError> {
        self.get_json(&format!("/repos/{owner}/{repo}/commits"), &[])
            .await
    }

    pub async fn fetch_workflow_runs(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<WorkflowRun>, ApiError> {
        let page: WorkflowRunPage = self
            .get_json(&format!("/repos/{owner}/{repo}/actions/runs"), &[])
            .await?;
        Ok(page.workflow_runs)
    }
}

/// Decode a base64 README payload. The API wraps the content across lines, so
/// whitespace is stripped before decoding.
pub fn decode_readme(content: &str) -> Result<String, ApiError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::github::GithubClient;
use crate::github::contributions::{ContributionCalendar, ContributionsClient};
use crate::github::models::{
    Commit, Contributor, EventItem, Gist, Issue, LanguageSlice, Organization, Profile,
    PullRequest, Repository, WorkflowRun,
};
use crate::stats;

/// Events kept from the public feed.
pub const RECENT_EVENT_LIMIT: usize = 10;
/// Pull requests and issues are fanned out over this many repositories only,
/// to bound request volume.
pub const DETAIL_REPO_LIMIT: usize = 5;

pub const PROFILE_README_FALLBACK: &str = "No profile README available";

/// Per-repository statistics fetched for the newest repository only. Repos
/// beyond the first never get this treatment; it is a sample, not a feature.
#[derive(Debug)]
pub struct RepoSpotlight {
    pub repo_name: String,
    pub contributors: Vec<Contributor>,
    pub languages: Vec<LanguageSlice>,
    pub commits: Vec<Commit>,
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Everything one refresh produces. Applied to state atomically: either the
/// whole snapshot lands or none of it does.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub profile: Profile,
    pub repos: Vec<Repository>,
    pub events: Vec<EventItem>,
    pub gists: Vec<Gist>,
    pub organizations: Vec<Organization>,
    pub profile_readme: String,
    pub pulls: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub contributions: Option<ContributionCalendar>,
    pub spotlight: Option<RepoSpotlight>,
    pub skills: HashMap<String, usize>,
    pub language_stats: HashMap<String, u64>,
    /// Non-fatal problems hit along the way, surfaced as toasts.
    pub warnings: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Best-effort refresh of every tracked collection for the subject account.
///
/// The five primary calls are joined as one batch; any failure fails the
/// refresh. The profile README and the contribution calendar are isolated:
/// they degrade to placeholders and a warning instead. The PR/issue fan-out
/// and the first-repo spotlight share the primary failure domain.
pub async fn fetch_snapshot(
    client: &GithubClient,
    contributions_client: &ContributionsClient,
    username: &str,
) -> Result<DashboardSnapshot> {
    debug!(user = username, "Refresh starting");

    let (profile, repos, mut events, gists, organizations) = tokio::try_join!(
        client.fetch_profile(username),
        client.fetch_repos(username),
        client.fetch_events(username),
        client.fetch_gists(username),
        client.fetch_organizations(username),
    )?;

    events.truncate(RECENT_EVENT_LIMIT);

    let (skills, language_stats) = stats::language_usage(&repos);

    let mut warnings = Vec::new();

    // The profile README lives in the user's eponymous repository. Missing or
    // unreadable is normal; it must never fail the refresh.
    let profile_readme = match client.fetch_readme(username, username).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Profile README unavailable");
            warnings.push(format!("Profile README unavailable: {e}"));
            PROFILE_README_FALLBACK.to_string()
        }
    };

    let sample = &repos[..repos.len().min(DETAIL_REPO_LIMIT)];

    let pulls: Vec<PullRequest> =
        try_join_all(sample.iter().map(|r| client.fetch_pulls(username, &r.name)))
            .await?
            .into_iter()
            .flatten()
            .collect();

    let issues: Vec<Issue> =
        try_join_all(sample.iter().map(|r| client.fetch_issues(username, &r.name)))
            .await?
            .into_iter()
            .flatten()
            .collect();

    // Third-party service; isolated so it cannot take the dashboard down.
    let contributions = match contributions_client.fetch_calendar(username).await {
        Ok(calendar) => Some(calendar),
        Err(e) => {
            warn!(error = %e, "Contribution calendar unavailable");
            warnings.push(format!("Contribution calendar unavailable: {e}"));
            None
        }
    };

    let spotlight = match repos.first() {
        Some(first) => {
            let (contributors, languages, commits, workflow_runs) = tokio::try_join!(
                client.fetch_contributors(username, &first.name),
                client.fetch_languages(username, &first.name),
                client.fetch_commits(username, &first.name),
                client.fetch_workflow_runs(username, &first.name),
            )?;
            Some(RepoSpotlight {
                repo_name: first.name.clone(),
                contributors,
                languages,
                commits,
                workflow_runs,
            })
        }
        None => None,
    };

    debug!(
        user = username,
        repos = repos.len(),
        pulls = pulls.len(),
        issues = issues.len(),
        "Refresh complete"
    );

    Ok(DashboardSnapshot {
        profile,
        repos,
        events,
        gists,
        organizations,
        profile_readme,
        pulls,
        issues,
        contributions,
        spotlight,
        skills,
        language_stats,
        warnings,
        fetched_at: Utc::now(),
    })
}

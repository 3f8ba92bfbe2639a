use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Duration as TimeDelta, Utc};

use crate::app::refresh::{DashboardSnapshot, RepoSpotlight};
use crate::github::contributions::ContributionCalendar;
use crate::github::models::{
    EventItem, Gist, Issue, Organization, Profile, PullRequest, Repository,
};
use crate::util::config::{Achievement, BlogPost};

/// Fixed client-side page size for the repository list.
pub const REPOS_PER_PAGE: usize = 9;

pub const NO_README_PLACEHOLDER: &str = "No README available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Repositories,
    Activity,
    Gists,
    PullRequests,
    Issues,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Repositories,
        Tab::Activity,
        Tab::Gists,
        Tab::PullRequests,
        Tab::Issues,
        Tab::Insights,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Repositories => "Repositories",
            Tab::Activity => "Activity",
            Tab::Gists => "Gists",
            Tab::PullRequests => "Pull Requests",
            Tab::Issues => "Issues",
            Tab::Insights => "Insights",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    Updated,
    Name,
    Issues,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Updated => "updated",
            SortKey::Name => "name",
            SortKey::Issues => "issues",
        }
    }

    pub fn next(self) -> SortKey {
        match self {
            SortKey::Stars => SortKey::Updated,
            SortKey::Updated => SortKey::Name,
            SortKey::Name => SortKey::Issues,
            SortKey::Issues => SortKey::Stars,
        }
    }
}

/// Creation-date filter presets cycled with one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    All,
    Days30,
    Days90,
    Year,
}

impl DatePreset {
    pub fn label(self) -> &'static str {
        match self {
            DatePreset::All => "all time",
            DatePreset::Days30 => "30 days",
            DatePreset::Days90 => "90 days",
            DatePreset::Year => "1 year",
        }
    }

    pub fn next(self) -> DatePreset {
        match self {
            DatePreset::All => DatePreset::Days30,
            DatePreset::Days30 => DatePreset::Days90,
            DatePreset::Days90 => DatePreset::Year,
            DatePreset::Year => DatePreset::All,
        }
    }

    pub fn bounds(self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let days = match self {
            DatePreset::All => return None,
            DatePreset::Days30 => 30,
            DatePreset::Days90 => 90,
            DatePreset::Year => 365,
        };
        Some((now - TimeDelta::days(days), now))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Error,
    Warn,
    Info,
}

impl NotifyLevel {
    pub fn ttl(self) -> Duration {
        match self {
            NotifyLevel::Error => Duration::from_secs(30),
            NotifyLevel::Warn => Duration::from_secs(8),
            NotifyLevel::Info => Duration::from_secs(5),
        }
    }
}

/// Transient toast, pruned once its level's TTL elapses.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub created: Instant,
}

impl Notification {
    pub fn expired(&self) -> bool {
        self.created.elapsed() > self.level.ttl()
    }
}

#[derive(Debug)]
pub struct DashboardState {
    // Fetched data, replaced wholesale by each snapshot
    pub profile: Option<Profile>,
    pub repos: Vec<Repository>,
    pub filtered_repos: Vec<Repository>,
    pub events: Vec<EventItem>,
    pub gists: Vec<Gist>,
    pub pulls: Vec<PullRequest>,
    pub issues: Vec<Issue>,
    pub organizations: Vec<Organization>,
    pub contributions: Option<ContributionCalendar>,
    pub spotlight: Option<RepoSpotlight>,
    pub skills: HashMap<String, usize>,
    pub language_stats: HashMap<String, u64>,
    pub profile_readme: String,
    pub last_refresh: Option<DateTime<Utc>>,

    // Injected demo content, never fetched
    pub blog_posts: Vec<BlogPost>,
    pub achievements: Vec<Achievement>,

    // Repository browsing
    pub search_active: bool,
    pub search_query: String,
    pub sort_key: SortKey,
    pub language_filter: Option<String>,
    pub date_preset: DatePreset,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub current_page: usize,
    pub infinite_scroll: bool,
    pub selected_repo: Option<String>,
    pub readme_content: Option<String>,
    pub readme_loading: bool,

    // Navigation
    pub active_tab: Tab,
    pub cursor: usize,

    // UI flags
    pub loading: bool,
    pub error_message: Option<String>,
    pub notifications: Vec<Notification>,
    pub should_quit: bool,
}

impl DashboardState {
    pub fn new(blog_posts: Vec<BlogPost>, achievements: Vec<Achievement>) -> Self {
        Self {
            profile: None,
            repos: Vec::new(),
            filtered_repos: Vec::new(),
            events: Vec::new(),
            gists: Vec::new(),
            pulls: Vec::new(),
            issues: Vec::new(),
            organizations: Vec::new(),
            contributions: None,
            spotlight: None,
            skills: HashMap::new(),
            language_stats: HashMap::new(),
            profile_readme: String::new(),
            last_refresh: None,
            blog_posts,
            achievements,
            search_active: false,
            search_query: String::new(),
            sort_key: SortKey::Stars,
            language_filter: None,
            date_preset: DatePreset::All,
            date_range: None,
            current_page: 1,
            infinite_scroll: true,
            selected_repo: None,
            readme_content: None,
            readme_loading: false,
            active_tab: Tab::Overview,
            cursor: 0,
            loading: true,
            error_message: None,
            notifications: Vec::new(),
            should_quit: false,
        }
    }

    /// Apply one refresh outcome atomically. Every slice is replaced; the
    /// filter pipeline reruns against the new repository list.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.profile = Some(snapshot.profile);
        self.repos = snapshot.repos;
        self.events = snapshot.events;
        self.gists = snapshot.gists;
        self.pulls = snapshot.pulls;
        self.issues = snapshot.issues;
        self.organizations = snapshot.organizations;
        self.contributions = snapshot.contributions;
        self.spotlight = snapshot.spotlight;
        self.skills = snapshot.skills;
        self.language_stats = snapshot.language_stats;
        self.profile_readme = snapshot.profile_readme;
        self.last_refresh = Some(snapshot.fetched_at);
        self.loading = false;
        self.error_message = None;

        if let Some(name) = &self.selected_repo
            && !self.repos.iter().any(|r| &r.name == name)
        {
            self.selected_repo = None;
            self.readme_content = None;
        }

        self.apply_filters();
    }

    fn matches_filters(&self, repo: &Repository) -> bool {
        if !self.search_query.is_empty()
            && !repo
                .name
                .to_lowercase()
                .contains(&self.search_query.to_lowercase())
        {
            return false;
        }

        if let Some(filter) = &self.language_filter
            && repo.language.as_deref() != Some(filter.as_str())
        {
            return false;
        }

        if let Some((start, end)) = self.date_range
            && (repo.created_at < start || repo.created_at > end)
        {
            return false;
        }

        true
    }

    /// Recompute `filtered_repos` from the current inputs. Deterministic:
    /// same inputs, same output. Sorting is stable, so equal keys keep their
    /// relative fetch order. Resets pagination to the first page.
    pub fn apply_filters(&mut self) {
        let mut filtered: Vec<Repository> = self
            .repos
            .iter()
            .filter(|r| self.matches_filters(r))
            .cloned()
            .collect();

        match self.sort_key {
            SortKey::Stars => {
                filtered.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
            }
            SortKey::Updated => filtered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            SortKey::Name => {
                filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            SortKey::Issues => {
                filtered.sort_by(|a, b| b.open_issues_count.cmp(&a.open_issues_count));
            }
        }

        self.filtered_repos = filtered;
        self.current_page = 1;
        self.clamp_cursor();
    }

    /// Revealed prefix of the filtered list: page N means the first N pages'
    /// worth of items, not a window.
    pub fn paginated_repos(&self) -> &[Repository] {
        let end = (self.current_page * REPOS_PER_PAGE).min(self.filtered_repos.len());
        &self.filtered_repos[..end]
    }

    pub fn total_pages(&self) -> usize {
        self.filtered_repos.len().div_ceil(REPOS_PER_PAGE)
    }

    /// Reveal one more page. Level-triggered: calling this repeatedly at the
    /// last page is a no-op, never a double advance.
    pub fn advance_page(&mut self) -> bool {
        if self.infinite_scroll && self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Length of the list the cursor moves over in the active tab.
    pub fn visible_len(&self) -> usize {
        match self.active_tab {
            Tab::Overview | Tab::Insights => 0,
            Tab::Repositories => self.paginated_repos().len(),
            Tab::Activity => self.events.len(),
            Tab::Gists => self.gists.len(),
            Tab::PullRequests => self.pulls.len(),
            Tab::Issues => self.issues.len(),
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn repo_under_cursor(&self) -> Option<&Repository> {
        if self.active_tab == Tab::Repositories {
            self.paginated_repos().get(self.cursor)
        } else {
            None
        }
    }

    /// Distinct languages across all repositories, sorted, for filter cycling.
    pub fn language_options(&self) -> Vec<String> {
        let mut langs: Vec<String> = self
            .repos
            .iter()
            .filter_map(|r| r.language.clone())
            .collect();
        langs.sort();
        langs.dedup();
        langs
    }

    pub fn push_notification(&mut self, level: NotifyLevel, message: impl Into<String>) {
        self.notifications.push(Notification {
            message: message.into(),
            level,
            created: Instant::now(),
        });
    }

    pub fn prune_notifications(&mut self) {
        self.notifications.retain(|n| !n.expired());
    }
}

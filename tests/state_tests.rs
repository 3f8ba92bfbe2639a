use chrono::{TimeZone, Utc};

use quackhub::app::actions::{Action, DataPayload, SideEffect};
use quackhub::app::refresh::DashboardSnapshot;
use quackhub::app::state::{
    DashboardState, NO_README_PLACEHOLDER, REPOS_PER_PAGE, SortKey, Tab,
};
use quackhub::app::update::update;
use quackhub::github::models::{Profile, Repository};
use quackhub::stats;

fn make_state() -> DashboardState {
    DashboardState::new(vec![], vec![])
}

fn make_repo(name: &str, language: Option<&str>, stars: u32, created: &str) -> Repository {
    Repository {
        id: name.len() as u64,
        name: name.into(),
        full_name: format!("testuser/{}", name),
        description: None,
        language: language.map(|l| l.to_string()),
        stargazers_count: stars,
        forks_count: 0,
        watchers_count: 0,
        open_issues_count: 0,
        topics: vec![],
        html_url: format!("https://github.com/testuser/{}", name),
        homepage: None,
        created_at: format!("{created}T00:00:00Z").parse().unwrap(),
        updated_at: Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
        pushed_at: None,
        size: 100,
        default_branch: "main".into(),
    }
}

fn make_profile() -> Profile {
    Profile {
        login: "testuser".into(),
        name: Some("Test User".into()),
        bio: None,
        avatar_url: "https://example.com/avatar.png".into(),
        html_url: "https://github.com/testuser".into(),
        company: None,
        blog: None,
        location: None,
        public_repos: 2,
        followers: 1,
        following: 1,
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn make_snapshot(repos: Vec<Repository>) -> DashboardSnapshot {
    let (skills, language_stats) = stats::language_usage(&repos);
    DashboardSnapshot {
        profile: make_profile(),
        repos,
        events: vec![],
        gists: vec![],
        organizations: vec![],
        profile_readme: "hello".into(),
        pulls: vec![],
        issues: vec![],
        contributions: None,
        spotlight: None,
        skills,
        language_stats,
        warnings: vec![],
        fetched_at: Utc::now(),
    }
}

fn sample_repos() -> Vec<Repository> {
    vec![
        make_repo("alpha", Some("Go"), 10, "2023-01-01"),
        make_repo("beta", Some("Rust"), 5, "2023-06-01"),
    ]
}

// --- Initial state ---

#[test]
fn test_initial_state_defaults() {
    let state = make_state();
    assert_eq!(state.active_tab, Tab::Overview);
    assert_eq!(state.cursor, 0);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.sort_key, SortKey::Stars);
    assert!(state.loading);
    assert!(state.infinite_scroll);
    assert!(state.repos.is_empty());
    assert!(state.filtered_repos.is_empty());
    assert!(!state.should_quit);
}

// --- Filter pipeline ---

#[test]
fn test_sort_by_stars_descending() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.apply_filters();

    let names: Vec<&str> = state.filtered_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn test_language_filter_keeps_matching_only() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.language_filter = Some("Rust".into());
    state.apply_filters();

    let names: Vec<&str> = state.filtered_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["beta"]);
}

#[test]
fn test_search_no_match_is_empty_not_error() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.search_query = "zeta".into();
    state.apply_filters();

    assert!(state.filtered_repos.is_empty());
    assert!(state.error_message.is_none());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.search_query = "ALPH".into();
    state.apply_filters();

    assert_eq!(state.filtered_repos.len(), 1);
    assert_eq!(state.filtered_repos[0].name, "alpha");
}

#[test]
fn test_date_range_excluding_all_is_empty() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.date_range = Some((
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
    ));
    state.apply_filters();

    assert!(state.filtered_repos.is_empty());
}

#[test]
fn test_date_range_bounds_are_inclusive() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.date_range = Some((
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
    ));
    state.apply_filters();

    assert_eq!(state.filtered_repos.len(), 2);
}

#[test]
fn test_filtered_is_subset_satisfying_predicates() {
    let mut state = make_state();
    state.repos = vec![
        make_repo("alpha", Some("Go"), 10, "2023-01-01"),
        make_repo("alphabet", Some("Rust"), 3, "2023-02-01"),
        make_repo("beta", Some("Rust"), 5, "2023-06-01"),
        make_repo("gamma", None, 7, "2023-03-01"),
    ];
    state.search_query = "alpha".into();
    state.language_filter = Some("Rust".into());
    state.apply_filters();

    for repo in &state.filtered_repos {
        assert!(repo.name.to_lowercase().contains("alpha"));
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert!(state.repos.iter().any(|r| r.id == repo.id));
    }
    assert_eq!(state.filtered_repos.len(), 1);
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let mut state = make_state();
    state.repos = vec![
        make_repo("first", Some("Go"), 5, "2023-01-01"),
        make_repo("second", Some("Rust"), 5, "2023-02-01"),
        make_repo("third", Some("C"), 5, "2023-03-01"),
    ];
    state.sort_key = SortKey::Stars;
    state.apply_filters();

    let names: Vec<&str> = state.filtered_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[test]
fn test_sort_by_name_is_case_folded() {
    let mut state = make_state();
    state.repos = vec![
        make_repo("Zebra", Some("Go"), 1, "2023-01-01"),
        make_repo("apple", Some("Go"), 2, "2023-01-01"),
    ];
    state.sort_key = SortKey::Name;
    state.apply_filters();

    let names: Vec<&str> = state.filtered_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["apple", "Zebra"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.search_query = "a".into();
    state.apply_filters();
    let first: Vec<u64> = state.filtered_repos.iter().map(|r| r.id).collect();

    state.apply_filters();
    let second: Vec<u64> = state.filtered_repos.iter().map(|r| r.id).collect();

    assert_eq!(first, second);
}

#[test]
fn test_filter_change_resets_page() {
    let mut state = make_state();
    state.repos = (0..30)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.apply_filters();
    state.advance_page();
    assert_eq!(state.current_page, 2);

    state.search_query = "repo1".into();
    state.apply_filters();
    assert_eq!(state.current_page, 1);
}

// --- Pagination ---

#[test]
fn test_paginated_len_is_min_of_page_and_filtered() {
    let mut state = make_state();
    state.repos = (0..20)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.apply_filters();

    assert_eq!(state.paginated_repos().len(), REPOS_PER_PAGE);

    state.advance_page();
    assert_eq!(state.paginated_repos().len(), 2 * REPOS_PER_PAGE);

    state.advance_page();
    assert_eq!(state.paginated_repos().len(), 20);
}

#[test]
fn test_pagination_is_monotonic_prefix() {
    let mut state = make_state();
    state.repos = (0..20)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.apply_filters();

    let before: Vec<u64> = state.paginated_repos().iter().map(|r| r.id).collect();
    state.advance_page();
    let after: Vec<u64> = state.paginated_repos().iter().map(|r| r.id).collect();

    assert!(after.len() > before.len());
    assert_eq!(&after[..before.len()], &before[..]);
}

#[test]
fn test_advance_page_stops_at_last_page() {
    let mut state = make_state();
    state.repos = (0..12)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.apply_filters();

    assert!(state.advance_page());
    assert_eq!(state.current_page, 2);

    // Level-triggered: firing again at the last page must not advance
    assert!(!state.advance_page());
    assert!(!state.advance_page());
    assert_eq!(state.current_page, 2);
}

#[test]
fn test_advance_page_noop_when_infinite_scroll_disabled() {
    let mut state = make_state();
    state.repos = (0..20)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.apply_filters();
    state.infinite_scroll = false;

    assert!(!state.advance_page());
    assert_eq!(state.current_page, 1);
}

#[test]
fn test_move_down_at_last_row_reveals_next_page() {
    let mut state = make_state();
    state.repos = (0..12)
        .map(|i| make_repo(&format!("repo{i}"), Some("Rust"), i, "2023-01-01"))
        .collect();
    state.active_tab = Tab::Repositories;
    state.apply_filters();
    state.cursor = REPOS_PER_PAGE - 1;

    update(&mut state, Action::MoveDown);
    assert_eq!(state.current_page, 2);
    assert_eq!(state.cursor, REPOS_PER_PAGE);
}

// --- Snapshot application (batch semantics) ---

#[test]
fn test_snapshot_applies_all_slices() {
    let mut state = make_state();
    let effects = update(&mut state, Action::Refresh);
    assert!(state.loading);
    assert!(matches!(effects[0], SideEffect::RefreshAll));

    // Refresh is a no-op while one is in flight
    assert!(update(&mut state, Action::Refresh).is_empty());

    update(
        &mut state,
        Action::DataLoaded(DataPayload::Snapshot(Box::new(make_snapshot(sample_repos())))),
    );

    assert!(!state.loading);
    assert!(state.profile.is_some());
    assert_eq!(state.repos.len(), 2);
    assert_eq!(state.filtered_repos.len(), 2);
    assert_eq!(state.profile_readme, "hello");
    assert!(state.last_refresh.is_some());
    assert_eq!(state.skills.get("Rust"), Some(&1));
    assert_eq!(state.skills.get("Go"), Some(&1));
}

#[test]
fn test_batch_failure_applies_no_partial_state() {
    let mut state = make_state();
    update(&mut state, Action::Refresh);
    update(&mut state, Action::LoadError("profile fetch failed".into()));

    // None of the slices moved; the error view takes over
    assert!(state.profile.is_none());
    assert!(state.repos.is_empty());
    assert!(state.filtered_repos.is_empty());
    assert!(state.gists.is_empty());
    assert!(state.events.is_empty());
    assert!(!state.loading);
    assert_eq!(state.error_message.as_deref(), Some("profile fetch failed"));
    assert!(!state.notifications.is_empty());
}

#[test]
fn test_retry_after_error_clears_flag() {
    let mut state = make_state();
    update(&mut state, Action::Refresh);
    update(&mut state, Action::LoadError("boom".into()));

    let effects = update(&mut state, Action::Refresh);
    assert!(matches!(effects[0], SideEffect::RefreshAll));
    assert!(state.error_message.is_none());
    assert!(state.loading);
}

#[test]
fn test_snapshot_warnings_become_notifications() {
    let mut state = make_state();
    state.loading = false;
    let mut snapshot = make_snapshot(sample_repos());
    snapshot.warnings.push("Contribution calendar unavailable: 503".into());

    update(&mut state, Action::DataLoaded(DataPayload::Snapshot(Box::new(snapshot))));

    assert_eq!(state.notifications.len(), 1);
    assert!(state.error_message.is_none());
}

// --- Repository selection & README ---

#[test]
fn test_select_repo_requests_readme() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.active_tab = Tab::Repositories;
    state.apply_filters();

    let effects = update(&mut state, Action::Select);
    assert!(matches!(
        &effects[0],
        SideEffect::FetchRepoReadme { repo } if repo == "alpha"
    ));
    assert_eq!(state.selected_repo.as_deref(), Some("alpha"));
    assert!(state.readme_loading);
}

#[test]
fn test_readme_failure_sets_placeholder_and_notifies() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.active_tab = Tab::Repositories;
    state.apply_filters();
    update(&mut state, Action::Select);

    update(
        &mut state,
        Action::DataLoaded(DataPayload::RepoReadmeFailed {
            repo: "alpha".into(),
            message: "404".into(),
        }),
    );

    assert_eq!(state.readme_content.as_deref(), Some(NO_README_PLACEHOLDER));
    assert!(!state.readme_loading);
    assert_eq!(state.notifications.len(), 1);
    assert!(state.error_message.is_none());
}

#[test]
fn test_stale_readme_for_deselected_repo_is_ignored() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.active_tab = Tab::Repositories;
    state.apply_filters();
    update(&mut state, Action::Select);
    update(&mut state, Action::Back);

    update(
        &mut state,
        Action::DataLoaded(DataPayload::RepoReadme {
            repo: "alpha".into(),
            content: "# alpha".into(),
        }),
    );

    assert!(state.readme_content.is_none());
}

// --- Navigation ---

#[test]
fn test_tab_cycling_wraps() {
    let mut state = make_state();
    assert_eq!(state.active_tab, Tab::Overview);

    update(&mut state, Action::NextTab);
    assert_eq!(state.active_tab, Tab::Repositories);

    update(&mut state, Action::PrevTab);
    update(&mut state, Action::PrevTab);
    assert_eq!(state.active_tab, Tab::Insights);
}

#[test]
fn test_cursor_clamped_to_visible_list() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.active_tab = Tab::Repositories;
    state.apply_filters();
    state.cursor = 1;

    update(&mut state, Action::MoveDown);
    assert_eq!(state.cursor, 1);

    update(&mut state, Action::MoveUp);
    assert_eq!(state.cursor, 0);
    update(&mut state, Action::MoveUp);
    assert_eq!(state.cursor, 0);
}

#[test]
fn test_search_input_recomputes_synchronously() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.active_tab = Tab::Repositories;
    state.apply_filters();

    update(&mut state, Action::ToggleSearch);
    update(&mut state, Action::SearchInput('b'));
    assert_eq!(state.filtered_repos.len(), 1);
    assert_eq!(state.filtered_repos[0].name, "beta");

    update(&mut state, Action::SearchBackspace);
    assert_eq!(state.filtered_repos.len(), 2);
}

#[test]
fn test_cycle_language_filter_walks_options_then_clears() {
    let mut state = make_state();
    state.repos = sample_repos();
    state.apply_filters();

    update(&mut state, Action::CycleLanguageFilter);
    assert_eq!(state.language_filter.as_deref(), Some("Go"));

    update(&mut state, Action::CycleLanguageFilter);
    assert_eq!(state.language_filter.as_deref(), Some("Rust"));

    update(&mut state, Action::CycleLanguageFilter);
    assert_eq!(state.language_filter, None);
}

#[test]
fn test_quit_sets_flag() {
    let mut state = make_state();
    update(&mut state, Action::Quit);
    assert!(state.should_quit);
}

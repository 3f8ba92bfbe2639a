use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};

use quackhub::github::models::{Commit, CommitAuthor, CommitDetail, Repository};
use quackhub::stats::{commit_activity, language_usage, ranked};

fn make_repo(name: &str, language: Option<&str>, size: u64) -> Repository {
    Repository {
        id: name.len() as u64,
        name: name.into(),
        full_name: format!("user/{}", name),
        description: None,
        language: language.map(|l| l.to_string()),
        stargazers_count: 0,
        forks_count: 0,
        watchers_count: 0,
        open_issues_count: 0,
        topics: vec![],
        html_url: String::new(),
        homepage: None,
        created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        pushed_at: None,
        size,
        default_branch: "main".into(),
    }
}

fn make_commit(sha: &str, timestamp: &str) -> Commit {
    Commit {
        sha: sha.into(),
        commit: CommitDetail {
            message: "work".into(),
            author: Some(CommitAuthor {
                name: "dev".into(),
                date: timestamp.parse().unwrap(),
            }),
        },
    }
}

#[test]
fn test_skill_counts_sum_to_repo_count_when_all_have_language() {
    let repos = vec![
        make_repo("a", Some("Rust"), 10),
        make_repo("b", Some("Rust"), 20),
        make_repo("c", Some("Go"), 30),
    ];

    let (skills, _) = language_usage(&repos);
    let total: usize = skills.values().sum();
    assert_eq!(total, repos.len());
    assert_eq!(skills.get("Rust"), Some(&2));
    assert_eq!(skills.get("Go"), Some(&1));
}

#[test]
fn test_language_sizes_accumulate_per_language() {
    let repos = vec![
        make_repo("a", Some("Rust"), 10),
        make_repo("b", Some("Rust"), 20),
        make_repo("c", Some("Go"), 30),
    ];

    let (_, sizes) = language_usage(&repos);
    assert_eq!(sizes.get("Rust"), Some(&30));
    assert_eq!(sizes.get("Go"), Some(&30));
}

#[test]
fn test_repos_without_language_are_skipped() {
    let repos = vec![
        make_repo("a", Some("Rust"), 10),
        make_repo("b", None, 999),
    ];

    let (skills, sizes) = language_usage(&repos);
    assert_eq!(skills.len(), 1);
    assert_eq!(sizes.values().sum::<u64>(), 10);
}

#[test]
fn test_language_usage_is_order_independent() {
    let mut repos = vec![
        make_repo("a", Some("Rust"), 10),
        make_repo("b", Some("Go"), 20),
        make_repo("c", Some("Rust"), 5),
    ];
    let forward = language_usage(&repos);
    repos.reverse();
    let backward = language_usage(&repos);

    assert_eq!(forward.0, backward.0);
    assert_eq!(forward.1, backward.1);
}

#[test]
fn test_commit_activity_groups_by_utc_date() {
    let commits = vec![
        make_commit("a", "2023-06-01T09:00:00Z"),
        make_commit("b", "2023-06-01T23:59:00Z"),
        make_commit("c", "2023-06-02T00:01:00Z"),
    ];

    let activity = commit_activity(&commits);
    assert_eq!(
        activity,
        vec![
            (NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(), 2),
            (NaiveDate::from_ymd_opt(2023, 6, 2).unwrap(), 1),
        ]
    );
}

#[test]
fn test_commit_activity_is_date_ordered_regardless_of_input_order() {
    let commits = vec![
        make_commit("a", "2023-06-05T12:00:00Z"),
        make_commit("b", "2023-06-01T12:00:00Z"),
        make_commit("c", "2023-06-03T12:00:00Z"),
    ];

    let activity = commit_activity(&commits);
    let dates: Vec<NaiveDate> = activity.iter().map(|(d, _)| *d).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_commit_activity_skips_authorless_commits() {
    let mut commits = vec![make_commit("a", "2023-06-01T09:00:00Z")];
    commits.push(Commit {
        sha: "b".into(),
        commit: CommitDetail {
            message: "orphan".into(),
            author: None,
        },
    });

    let activity = commit_activity(&commits);
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].1, 1);
}

#[test]
fn test_ranked_sorts_descending_with_name_tiebreak() {
    let mut map = HashMap::new();
    map.insert("Rust".to_string(), 5u64);
    map.insert("Go".to_string(), 9);
    map.insert("C".to_string(), 5);

    let ranked = ranked(&map);
    assert_eq!(
        ranked,
        vec![
            ("Go".to_string(), 9),
            ("C".to_string(), 5),
            ("Rust".to_string(), 5),
        ]
    );
}

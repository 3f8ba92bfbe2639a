use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::github::models::{Commit, Repository};

/// Per-language aggregates over the repository list: how many repositories
/// use each language, and the cumulative repository size per language (KB).
/// One pass, order-independent; repositories without a language are skipped.
pub fn language_usage(repos: &[Repository]) -> (HashMap<String, usize>, HashMap<String, u64>) {
    let mut skills: HashMap<String, usize> = HashMap::new();
    let mut sizes: HashMap<String, u64> = HashMap::new();

    for repo in repos {
        if let Some(lang) = &repo.language {
            *skills.entry(lang.clone()).or_insert(0) += 1;
            *sizes.entry(lang.clone()).or_insert(0) += repo.size;
        }
    }

    (skills, sizes)
}

/// Commits grouped by the UTC calendar date of the author timestamp,
/// ascending by date. Commits with no author record are skipped.
pub fn commit_activity(commits: &[Commit]) -> Vec<(NaiveDate, usize)> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for commit in commits {
        if let Some(author) = &commit.commit.author {
            *per_day.entry(author.date.date_naive()).or_insert(0) += 1;
        }
    }

    per_day.into_iter().collect()
}

/// Chart ordering for a frequency map: descending by value, name as the
/// tiebreak so equal values render stably.
pub fn ranked<V>(map: &HashMap<String, V>) -> Vec<(String, V)>
where
    V: Copy + Ord,
{
    let mut entries: Vec<(String, V)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

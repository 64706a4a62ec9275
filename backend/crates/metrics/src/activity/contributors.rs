use std::collections::{BTreeMap, BTreeSet};

use pulse_records::CommitRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub commit_count: usize,
    pub additions: i64,
    pub deletions: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributorMetrics {
    pub total_commits: usize,
    pub unique_contributors: usize,
    pub total_lines_added: i64,
    pub total_lines_deleted: i64,
    pub top_contributors: BTreeMap<String, ContributorStats>,
}

impl ContributorMetrics {
    /// Top `n` authors by commit count.
    pub fn top(&self, n: usize) -> Vec<(String, ContributorStats)> {
        super::top_n(self.top_contributors.clone(), n, |s| s.commit_count as u64)
    }
}

/// Commits are keyed by sha; a repeated sha is counted once.
pub fn compute_contributor_metrics(commits: &[CommitRecord]) -> ContributorMetrics {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut metrics = ContributorMetrics::default();

    for commit in commits {
        if !seen.insert(commit.sha.as_str()) {
            tracing::debug!(sha = %commit.sha, "duplicate commit skipped");
            continue;
        }
        metrics.total_commits += 1;
        metrics.total_lines_added += commit.additions;
        metrics.total_lines_deleted += commit.deletions;

        let stats = metrics
            .top_contributors
            .entry(commit.author.clone())
            .or_default();
        stats.commit_count += 1;
        stats.additions += commit.additions;
        stats.deletions += commit.deletions;
    }

    metrics.unique_contributors = metrics.top_contributors.len();
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_commit(sha: &str, author: &str, additions: i64, deletions: i64) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            author: author.to_string(),
            date: Utc::now(),
            additions,
            deletions,
        }
    }

    #[test]
    fn aggregates_per_author() {
        let commits = vec![
            make_commit("a1", "alice", 10, 2),
            make_commit("a2", "alice", 5, 0),
            make_commit("b1", "bob", 1, 1),
        ];
        let m = compute_contributor_metrics(&commits);
        assert_eq!(m.total_commits, 3);
        assert_eq!(m.unique_contributors, 2);
        assert_eq!(m.total_lines_added, 16);
        assert_eq!(m.total_lines_deleted, 3);
        assert_eq!(
            m.top_contributors["alice"],
            ContributorStats {
                commit_count: 2,
                additions: 15,
                deletions: 2
            }
        );
        assert_eq!(m.top(1)[0].0, "alice");
    }

    #[test]
    fn duplicate_sha_counted_once() {
        let commits = vec![make_commit("a1", "alice", 10, 2), make_commit("a1", "alice", 10, 2)];
        let m = compute_contributor_metrics(&commits);
        assert_eq!(m.total_commits, 1);
        assert_eq!(m.total_lines_added, 10);
    }
}

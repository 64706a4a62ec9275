//! Pull-request, review and commit rollups.

pub mod contributors;
pub mod pull_requests;
pub mod reviews;

use pulse_records::{ChangeRecord, CommitRecord, ReviewRecord};
use serde::{Deserialize, Serialize};

pub use contributors::{compute_contributor_metrics, ContributorMetrics, ContributorStats};
pub use pull_requests::{compute_pr_metrics, PrMetrics, SizeDistribution};
pub use reviews::{compute_review_metrics, ReviewMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub pull_requests: PrMetrics,
    pub reviews: ReviewMetrics,
    pub contributors: ContributorMetrics,
}

pub fn compute_activity(
    changes: &[ChangeRecord],
    reviews: &[ReviewRecord],
    commits: &[CommitRecord],
) -> ActivityReport {
    tracing::debug!(
        changes = changes.len(),
        reviews = reviews.len(),
        commits = commits.len(),
        "computing activity rollups"
    );
    ActivityReport {
        pull_requests: compute_pr_metrics(changes),
        reviews: compute_review_metrics(reviews),
        contributors: compute_contributor_metrics(commits),
    }
}

/// Entries of a count map sorted by descending count, ties by name.
pub fn top_n<V, F>(entries: impl IntoIterator<Item = (String, V)>, n: usize, key: F) -> Vec<(String, V)>
where
    F: Fn(&V) -> u64,
{
    let mut sorted: Vec<(String, V)> = entries.into_iter().collect();
    sorted.sort_by(|a, b| key(&b.1).cmp(&key(&a.1)).then_with(|| a.0.cmp(&b.0)));
    sorted.truncate(n);
    sorted
}

use std::collections::{BTreeMap, BTreeSet};

use pulse_records::ReviewRecord;
use serde::{Deserialize, Serialize};

use crate::stats::ratio;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewMetrics {
    pub total_reviews: usize,
    pub unique_reviewers: usize,
    pub avg_reviews_per_pr: f64,
    /// Reviewer → review count. Unbounded; truncate for display.
    pub top_reviewers: BTreeMap<String, usize>,
}

impl ReviewMetrics {
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        super::top_n(self.top_reviewers.clone(), n, |c| *c as u64)
    }
}

/// Reviews with a blank reviewer are dropped before counting.
pub fn compute_review_metrics(reviews: &[ReviewRecord]) -> ReviewMetrics {
    let mut top_reviewers: BTreeMap<String, usize> = BTreeMap::new();
    let mut reviewed_prs: BTreeSet<&str> = BTreeSet::new();
    let mut total_reviews = 0usize;

    for review in reviews {
        let reviewer = review.reviewer.trim();
        if reviewer.is_empty() {
            continue;
        }
        total_reviews += 1;
        *top_reviewers.entry(reviewer.to_string()).or_default() += 1;
        reviewed_prs.insert(review.pr_id.as_str());
    }

    ReviewMetrics {
        total_reviews,
        unique_reviewers: top_reviewers.len(),
        avg_reviews_per_pr: ratio(total_reviews as f64, reviewed_prs.len() as f64),
        top_reviewers,
    }
}

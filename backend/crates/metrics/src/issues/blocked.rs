use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

pub const FLAGGED_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedIssue {
    pub key: String,
    pub summary: Option<String>,
    pub status: String,
    pub assignee: String,
    pub days_blocked: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlaggedMetrics {
    pub total: usize,
    /// First ten in filter order.
    pub top: Vec<FlaggedIssue>,
}

pub fn analyze_flagged(flagged: &[IssueRecord]) -> FlaggedMetrics {
    FlaggedMetrics {
        total: flagged.len(),
        top: flagged
            .iter()
            .take(FLAGGED_LIMIT)
            .map(|issue| FlaggedIssue {
                key: issue.key.clone(),
                summary: issue.summary.clone(),
                status: issue.status.clone(),
                assignee: issue.assignee_or_default(),
                days_blocked: issue.days_in_current_status,
            })
            .collect(),
    }
}

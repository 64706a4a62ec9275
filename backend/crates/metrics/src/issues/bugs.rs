use std::collections::BTreeMap;

use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

use super::weekly_counts;
use crate::window::DateWindow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BugMetrics {
    /// Counts cover the whole supplied set.
    pub created: usize,
    pub resolved: usize,
    pub net: i64,
    /// Trends cover only the trailing window.
    pub trend_created: BTreeMap<String, usize>,
    pub trend_resolved: BTreeMap<String, usize>,
}

pub fn analyze_bugs(created: &[IssueRecord], resolved: &[IssueRecord], window: &DateWindow) -> BugMetrics {
    BugMetrics {
        created: created.len(),
        resolved: resolved.len(),
        net: created.len() as i64 - resolved.len() as i64,
        trend_created: weekly_counts(created, Some(window), IssueRecord::created_at),
        trend_resolved: weekly_counts(resolved, Some(window), IssueRecord::resolved_at),
    }
}

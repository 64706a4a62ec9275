use std::collections::{BTreeMap, BTreeSet};

use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

use super::weekly_counts;
use crate::stats::ratio;

pub const UNKNOWN_TYPE: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub total_completed: usize,
    pub weekly_avg: f64,
    pub week_count: usize,
    /// ISO week of resolution → completed issues.
    pub by_week: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

/// Completed issues, de-duplicated by key (first occurrence wins). Issues
/// without a usable resolution date count toward the total and type
/// breakdown but not toward any week.
pub fn analyze_throughput(completed: &[IssueRecord]) -> Throughput {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let unique: Vec<IssueRecord> = completed
        .iter()
        .filter(|issue| seen.insert(issue.key.as_str()))
        .cloned()
        .collect();

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for issue in &unique {
        let issue_type = issue
            .issue_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(UNKNOWN_TYPE);
        *by_type.entry(issue_type.to_string()).or_default() += 1;
    }

    let by_week = weekly_counts(&unique, None, IssueRecord::resolved_at);
    let total_completed = unique.len();
    let week_count = by_week.len();

    Throughput {
        total_completed,
        weekly_avg: ratio(total_completed as f64, week_count as f64),
        week_count,
        by_week,
        by_type,
    }
}

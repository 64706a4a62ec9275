use std::collections::BTreeMap;

use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

use crate::stats::mean;

/// Days-in-status buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBuckets {
    #[serde(rename = "0-3")]
    pub up_to_3: usize,
    #[serde(rename = "4-7")]
    pub up_to_7: usize,
    #[serde(rename = "8-14")]
    pub up_to_14: usize,
    #[serde(rename = "15+")]
    pub over_14: usize,
}

impl AgeBuckets {
    fn record(&mut self, days: f64) {
        if days <= 3.0 {
            self.up_to_3 += 1;
        } else if days <= 7.0 {
            self.up_to_7 += 1;
        } else if days <= 14.0 {
            self.up_to_14 += 1;
        } else {
            self.over_14 += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WipMetrics {
    pub count: usize,
    /// Over issues that report days in status; 0 when none do.
    pub avg_age_days: f64,
    pub age_buckets: AgeBuckets,
    pub by_status: BTreeMap<String, usize>,
}

pub fn analyze_wip(wip: &[IssueRecord]) -> WipMetrics {
    let ages: Vec<f64> = wip
        .iter()
        .filter_map(|issue| issue.days_in_current_status)
        .filter(|days| days.is_finite())
        .collect();

    let mut age_buckets = AgeBuckets::default();
    for days in &ages {
        age_buckets.record(*days);
    }

    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    for issue in wip {
        *by_status.entry(issue.status.clone()).or_default() += 1;
    }

    WipMetrics {
        count: wip.len(),
        avg_age_days: mean(&ages).unwrap_or(0.0),
        age_buckets,
        by_status,
    }
}

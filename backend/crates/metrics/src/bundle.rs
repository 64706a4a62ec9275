use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityReport;
use crate::dora::DoraReport;
use crate::issues::IssueMetrics;

pub const PRS: &str = "prs";
pub const REVIEWS: &str = "reviews";
pub const COMMITS: &str = "commits";
pub const CYCLE_TIME: &str = "cycle_time";
pub const MERGE_RATE: &str = "merge_rate";
pub const JIRA_COMPLETED: &str = "jira_completed";
pub const DEPLOYMENT_FREQUENCY: &str = "deployment_frequency";
pub const LEAD_TIME: &str = "lead_time";
pub const CHANGE_FAILURE_RATE: &str = "change_failure_rate";
pub const MTTR: &str = "mttr";
pub const TEAM_SIZE: &str = "team_size";

/// Named metric values for one entity (team or person). A `None` value is
/// an unmeasured metric, never a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricBundle {
    values: BTreeMap<String, Option<f64>>,
}

impl MetricBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite values are stored as unmeasured.
    pub fn with(mut self, name: &str, value: Option<f64>) -> Self {
        self.values
            .insert(name.to_string(), value.filter(|v| v.is_finite()));
        self
    }

    /// Measured value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied().flatten()
    }

    pub fn team_size(&self) -> Option<f64> {
        self.get(TEAM_SIZE)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Build a bundle from the computed reports. Metrics without samples
    /// (no cycle times, no throughput data, unmeasured DORA indicators) are
    /// recorded as `None`.
    pub fn from_reports(
        activity: &ActivityReport,
        dora: Option<&DoraReport>,
        issues: Option<&IssueMetrics>,
        team_size: Option<usize>,
    ) -> Self {
        let prs = &activity.pull_requests;
        let cycle_time = if prs.cycle_time_sample_size > 0 {
            Some(prs.avg_cycle_time_hours)
        } else {
            None
        };

        let mut bundle = Self::new()
            .with(PRS, Some(prs.total_prs as f64))
            .with(REVIEWS, Some(activity.reviews.total_reviews as f64))
            .with(COMMITS, Some(activity.contributors.total_commits as f64))
            .with(CYCLE_TIME, cycle_time)
            .with(MERGE_RATE, Some(prs.merge_rate))
            .with(
                JIRA_COMPLETED,
                issues
                    .and_then(|i| i.throughput.as_ref())
                    .map(|t| t.total_completed as f64),
            );

        if let Some(dora) = dora {
            bundle = bundle
                .with(DEPLOYMENT_FREQUENCY, Some(dora.deployment_frequency.per_day))
                .with(LEAD_TIME, dora.lead_time.median_hours)
                .with(CHANGE_FAILURE_RATE, dora.change_failure_rate.rate_percent)
                .with(MTTR, dora.mttr.median_hours);
        }

        if let Some(size) = team_size {
            bundle = bundle.with(TEAM_SIZE, Some(size as f64));
        }

        bundle
    }
}

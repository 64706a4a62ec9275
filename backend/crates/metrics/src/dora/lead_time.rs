use std::collections::BTreeMap;

use pulse_records::{ChangeRecord, DeploymentRecord};
use serde::{Deserialize, Serialize};

use super::classify::{classify_lead_time, DoraLevel};
use super::deployment::production_deployments;
use crate::keys::change_issue_key;
use crate::stats::{hours_between, iso_week_label, median, percentile_of};
use crate::window::DateWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadTime {
    pub median_hours: Option<f64>,
    pub median_days: Option<f64>,
    pub p90_hours: Option<f64>,
    pub sample_size: usize,
    /// Pairs resolved through the issue → deployment map.
    pub mapped_by_issue: usize,
    pub level: Option<DoraLevel>,
    /// ISO week of deployment → median lead time in hours.
    pub trend: BTreeMap<String, f64>,
}

/// Pair each merged change with the deployment that shipped it and measure
/// merge → publish time.
///
/// Pairing, in order of preference:
///   1. the change references an issue key present in `issue_to_deployment`
///      and a production deployment carries the mapped tag; this wins even
///      when that deployment predates the merge
///   2. the earliest production deployment published at or after the merge
///   3. otherwise the change is left out of the sample
pub fn analyze_lead_time(
    changes: &[ChangeRecord],
    deployments: &[DeploymentRecord],
    issue_to_deployment: &BTreeMap<String, String>,
) -> LeadTime {
    analyze_lead_time_within(changes, deployments, issue_to_deployment, None)
}

/// Same pairing as [`analyze_lead_time`], run over every deployment, with
/// the sample restricted to pairs whose deployment falls inside `window`.
pub fn analyze_lead_time_within(
    changes: &[ChangeRecord],
    deployments: &[DeploymentRecord],
    issue_to_deployment: &BTreeMap<String, String>,
    window: Option<&DateWindow>,
) -> LeadTime {
    let production = production_deployments(deployments, None);
    // A tag may repeat across repositories; each list stays oldest first.
    let mut by_tag: BTreeMap<&str, Vec<&DeploymentRecord>> = BTreeMap::new();
    for deployment in &production {
        by_tag.entry(deployment.tag.as_str()).or_default().push(*deployment);
    }

    let mut samples: Vec<(String, f64)> = Vec::new();
    let mut mapped_by_issue = 0usize;

    for change in changes {
        let Some(merged_at) = change.merged_time() else {
            continue;
        };

        let mapped = change_issue_key(change)
            .and_then(|key| issue_to_deployment.get(&key))
            .and_then(|tag| by_tag.get(tag.as_str()))
            .and_then(|candidates| {
                candidates
                    .iter()
                    .find(|d| d.published_at >= merged_at)
                    .or_else(|| candidates.last())
                    .copied()
            });

        let deployment = match mapped {
            Some(d) => {
                mapped_by_issue += 1;
                Some(d)
            }
            None => {
                let idx = production.partition_point(|d| d.published_at < merged_at);
                production.get(idx).copied()
            }
        };

        let deployment =
            deployment.filter(|d| window.map_or(true, |w| w.contains(d.published_at)));
        if let Some(deployment) = deployment {
            samples.push((
                iso_week_label(deployment.published_at),
                hours_between(merged_at, deployment.published_at),
            ));
        }
    }

    let hours: Vec<f64> = samples.iter().map(|(_, h)| *h).collect();
    let median_hours = median(&hours);

    let mut by_week: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (week, h) in samples {
        by_week.entry(week).or_default().push(h);
    }
    let trend = by_week
        .into_iter()
        .filter_map(|(week, values)| median(&values).map(|m| (week, m)))
        .collect();

    tracing::debug!(
        sample_size = hours.len(),
        mapped_by_issue,
        "lead time computed"
    );

    LeadTime {
        median_hours,
        median_days: median_hours.map(|h| h / 24.0),
        p90_hours: percentile_of(&hours, 90.0),
        sample_size: hours.len(),
        mapped_by_issue,
        level: median_hours.map(classify_lead_time),
        trend,
    }
}

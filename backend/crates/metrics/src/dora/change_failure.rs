use std::collections::{BTreeMap, BTreeSet};

use chrono::Duration;
use pulse_records::{DeploymentRecord, IncidentRecord};
use serde::{Deserialize, Serialize};

use super::classify::{classify_change_failure_rate, DoraLevel};
use super::deployment::production_deployments;
use crate::stats::iso_week_label;

/// An incident without an explicit deployment link is blamed on the latest
/// production deployment published at most this long before it.
pub const INCIDENT_ATTRIBUTION_WINDOW_HOURS: i64 = 24;

pub const NOTE_NO_INCIDENT_DATA: &str =
    "incident data not supplied; change failure rate requires incident records";
pub const NOTE_NO_DEPLOYMENTS: &str = "no production deployments in the measurement period";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeFailureRate {
    /// `None` means not computed, never 0%.
    pub rate_percent: Option<f64>,
    pub total_deployments: usize,
    pub failed_deployments: Option<usize>,
    pub level: Option<DoraLevel>,
    /// ISO week → failure rate of that week's deployments. Weeks without
    /// deployments are absent.
    pub trend: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChangeFailureRate {
    fn not_computed(total_deployments: usize, note: &str) -> Self {
        Self {
            rate_percent: None,
            total_deployments,
            failed_deployments: None,
            level: None,
            trend: BTreeMap::new(),
            note: Some(note.to_string()),
        }
    }
}

/// Share of production deployments followed by an incident. `incidents`
/// being `None` means no incident source exists; an empty slice is real
/// data showing no failures.
pub fn analyze_change_failure(
    deployments: &[DeploymentRecord],
    incidents: Option<&[IncidentRecord]>,
) -> ChangeFailureRate {
    let production = production_deployments(deployments, None);
    let total_deployments = production.len();

    let Some(incidents) = incidents else {
        return ChangeFailureRate::not_computed(total_deployments, NOTE_NO_INCIDENT_DATA);
    };
    if total_deployments == 0 {
        return ChangeFailureRate::not_computed(0, NOTE_NO_DEPLOYMENTS);
    }

    let window = Duration::hours(INCIDENT_ATTRIBUTION_WINDOW_HOURS);

    // Indexes into `production`; tags repeat across repositories.
    let mut failed: BTreeSet<usize> = BTreeSet::new();
    for incident in incidents {
        let culprit = match incident.related_deployment.as_deref() {
            Some(tag) => {
                let tagged: Vec<usize> = (0..production.len())
                    .filter(|&i| production[i].tag == tag)
                    .collect();
                tagged
                    .iter()
                    .rev()
                    .find(|&&i| production[i].published_at <= incident.created)
                    .or_else(|| tagged.first())
                    .copied()
            }
            None => {
                let idx = production.partition_point(|d| d.published_at <= incident.created);
                idx.checked_sub(1)
                    .filter(|&i| incident.created - production[i].published_at <= window)
            }
        };
        if let Some(idx) = culprit {
            failed.insert(idx);
        }
    }

    let mut weekly: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for (idx, deployment) in production.iter().enumerate() {
        let entry = weekly
            .entry(iso_week_label(deployment.published_at))
            .or_default();
        entry.0 += 1;
        if failed.contains(&idx) {
            entry.1 += 1;
        }
    }
    let trend = weekly
        .into_iter()
        .map(|(week, (total, failures))| (week, 100.0 * failures as f64 / total as f64))
        .collect();

    let failed_deployments = failed.len();
    let rate = 100.0 * failed_deployments as f64 / total_deployments as f64;

    tracing::debug!(
        total_deployments,
        failed_deployments,
        rate,
        "change failure rate computed"
    );

    ChangeFailureRate {
        rate_percent: Some(rate),
        total_deployments,
        failed_deployments: Some(failed_deployments),
        level: Some(classify_change_failure_rate(rate)),
        trend,
        note: None,
    }
}

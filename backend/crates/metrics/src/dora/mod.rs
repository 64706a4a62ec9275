//! DORA indicators: deployment frequency, lead time for changes, change
//! failure rate and time to restore, plus the overall maturity rating.

pub mod change_failure;
pub mod classify;
pub mod deployment;
pub mod lead_time;
pub mod mttr;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_records::{ChangeRecord, DeploymentRecord, IncidentRecord};
use serde::{Deserialize, Serialize};

pub use change_failure::{analyze_change_failure, ChangeFailureRate};
pub use classify::DoraLevel;
pub use deployment::{analyze_deployments, DeploymentFrequency};
pub use lead_time::{analyze_lead_time, analyze_lead_time_within, LeadTime};
pub use mttr::{analyze_mttr, TimeToRestore};

use crate::window::DateWindow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoraOptions {
    /// Explicit measurement window; derived from release dates when absent.
    pub window: Option<DateWindow>,
    /// Anchor for the default window when there is no data at all.
    pub as_of: DateTime<Utc>,
}

/// How many of the four indicators landed on each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBreakdown {
    pub elite: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub not_measured: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoraReport {
    pub deployment_frequency: DeploymentFrequency,
    pub lead_time: LeadTime,
    pub change_failure_rate: ChangeFailureRate,
    pub mttr: TimeToRestore,
    pub window: DateWindow,
    pub measurement_period_days: i64,
    pub dora_level: DoraLevel,
    pub breakdown: LevelBreakdown,
}

/// Overall rating from per-indicator levels. Unmeasured indicators are left
/// out of the counts rather than treated as low.
///
///   - Elite: at least three indicators elite
///   - High: at least two high or better
///   - Medium: at least two medium or better
///   - otherwise Low
pub fn overall_level(levels: &[Option<DoraLevel>]) -> (DoraLevel, LevelBreakdown) {
    let mut breakdown = LevelBreakdown::default();
    for level in levels {
        match level {
            Some(DoraLevel::Elite) => breakdown.elite += 1,
            Some(DoraLevel::High) => breakdown.high += 1,
            Some(DoraLevel::Medium) => breakdown.medium += 1,
            Some(DoraLevel::Low) => breakdown.low += 1,
            None => breakdown.not_measured += 1,
        }
    }

    let high_or_better = breakdown.elite + breakdown.high;
    let medium_or_better = high_or_better + breakdown.medium;

    let overall = if breakdown.elite >= 3 {
        DoraLevel::Elite
    } else if high_or_better >= 2 {
        DoraLevel::High
    } else if medium_or_better >= 2 {
        DoraLevel::Medium
    } else {
        DoraLevel::Low
    };

    (overall, breakdown)
}

/// Run all four analyzers over the window and rate the result.
///
/// Deployments and incidents outside the window are dropped first. Lead time
/// pairs changes against every deployment and keeps only pairs whose
/// deployment lies inside the window.
pub fn compute_dora(
    deployments: &[DeploymentRecord],
    changes: &[ChangeRecord],
    incidents: Option<&[IncidentRecord]>,
    issue_to_deployment: &BTreeMap<String, String>,
    options: DoraOptions,
) -> DoraReport {
    let window = DateWindow::resolve(
        options.window,
        deployments.iter().map(|d| d.published_at),
        options.as_of,
    );

    let in_window: Vec<DeploymentRecord> = deployments
        .iter()
        .filter(|d| window.contains(d.published_at))
        .cloned()
        .collect();
    let incidents_in_window: Option<Vec<IncidentRecord>> = incidents.map(|all| {
        all.iter()
            .filter(|i| window.contains(i.created))
            .cloned()
            .collect()
    });

    let deployment_frequency = analyze_deployments(&in_window, Some(window), options.as_of);
    let lead_time =
        analyze_lead_time_within(changes, deployments, issue_to_deployment, Some(&window));
    let change_failure_rate = analyze_change_failure(&in_window, incidents_in_window.as_deref());
    let mttr = analyze_mttr(incidents_in_window.as_deref());

    let (dora_level, breakdown) = overall_level(&[
        Some(deployment_frequency.level),
        lead_time.level,
        change_failure_rate.level,
        mttr.level,
    ]);

    tracing::debug!(
        dora_level = dora_level.label(),
        elite = breakdown.elite,
        not_measured = breakdown.not_measured,
        "dora metrics composed"
    );

    DoraReport {
        deployment_frequency,
        lead_time,
        change_failure_rate,
        mttr,
        window,
        measurement_period_days: window.days(),
        dora_level,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pulse_records::ChangeState;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn make_deployment(tag: &str, at: DateTime<Utc>) -> DeploymentRecord {
        DeploymentRecord {
            tag: tag.to_string(),
            environment: "production".to_string(),
            published_at: at,
            repo: "api".to_string(),
        }
    }

    fn make_merged(id: &str, merged_at: DateTime<Utc>) -> ChangeRecord {
        ChangeRecord {
            id: id.to_string(),
            title: format!("change {id}"),
            author: "alice".to_string(),
            merged: true,
            state: ChangeState::Merged,
            additions: 5,
            deletions: 5,
            created_at: merged_at - Duration::hours(10),
            merged_at: Some(merged_at),
            cycle_time_hours: Some(10.0),
            time_to_first_review_hours: Some(1.0),
        }
    }

    #[test]
    fn overall_elite_needs_three_elite() {
        let (level, breakdown) = overall_level(&[
            Some(DoraLevel::Elite),
            Some(DoraLevel::Elite),
            Some(DoraLevel::Elite),
            Some(DoraLevel::Low),
        ]);
        assert_eq!(level, DoraLevel::Elite);
        assert_eq!(breakdown.elite, 3);
        assert_eq!(breakdown.low, 1);
    }

    #[test]
    fn overall_high_from_two_high_or_better() {
        let (level, _) = overall_level(&[
            Some(DoraLevel::Elite),
            Some(DoraLevel::High),
            Some(DoraLevel::Low),
            Some(DoraLevel::Low),
        ]);
        assert_eq!(level, DoraLevel::High);
    }

    #[test]
    fn overall_medium_and_low() {
        let (level, _) = overall_level(&[
            Some(DoraLevel::Medium),
            Some(DoraLevel::High),
            Some(DoraLevel::Low),
            Some(DoraLevel::Low),
        ]);
        assert_eq!(level, DoraLevel::Medium);

        let (level, _) = overall_level(&[Some(DoraLevel::Elite), None, None, None]);
        assert_eq!(level, DoraLevel::Low);
    }

    #[test]
    fn unmeasured_metrics_are_not_counted_as_low() {
        let (level, breakdown) = overall_level(&[
            Some(DoraLevel::Elite),
            Some(DoraLevel::Elite),
            None,
            None,
        ]);
        assert_eq!(level, DoraLevel::High);
        assert_eq!(breakdown.low, 0);
        assert_eq!(breakdown.not_measured, 2);
    }

    #[test]
    fn composes_all_indicators() {
        let start = ts("2025-01-01T00:00:00Z");
        let deployments: Vec<DeploymentRecord> = (0..30)
            .map(|i| make_deployment(&format!("v{i}"), start + Duration::days(i)))
            .collect();
        let changes: Vec<ChangeRecord> = (0..10)
            .map(|i| make_merged(&i.to_string(), start + Duration::days(i) - Duration::hours(6)))
            .collect();

        let report = compute_dora(
            &deployments,
            &changes,
            None,
            &BTreeMap::new(),
            DoraOptions {
                window: None,
                as_of: start,
            },
        );

        assert_eq!(report.measurement_period_days, 29);
        assert_eq!(report.deployment_frequency.level, DoraLevel::Elite);
        // first change merges before the first deployment → 6h; all others 6h too
        assert_eq!(report.lead_time.median_hours, Some(6.0));
        assert!(report.change_failure_rate.rate_percent.is_none());
        assert!(report.mttr.median_hours.is_none());
        assert_eq!(report.breakdown.elite, 2);
        assert_eq!(report.breakdown.not_measured, 2);
        assert_eq!(report.dora_level, DoraLevel::High);
    }

    #[test]
    fn windowed_lead_time_pairs_against_all_deployments() {
        let window = DateWindow::new(ts("2025-01-01T00:00:00Z"), ts("2025-01-31T23:59:59Z"));
        let deployments = vec![
            make_deployment("v1", ts("2024-12-01T06:00:00Z")),
            make_deployment("v2", ts("2025-01-05T00:00:00Z")),
        ];
        let changes = vec![
            make_merged("early", ts("2024-12-01T00:00:00Z")),
            make_merged("late", ts("2025-01-04T12:00:00Z")),
        ];

        let report = compute_dora(
            &deployments,
            &changes,
            None,
            &BTreeMap::new(),
            DoraOptions {
                window: Some(window),
                as_of: ts("2025-02-01T00:00:00Z"),
            },
        );

        assert_eq!(report.lead_time.sample_size, 1);
        assert_eq!(report.lead_time.median_hours, Some(12.0));
        assert_eq!(report.deployment_frequency.total_deployments, 1);
    }

    #[test]
    fn explicit_window_filters_incidents() {
        let window = DateWindow::new(ts("2025-01-01T00:00:00Z"), ts("2025-01-31T00:00:00Z"));
        let deployments = vec![make_deployment("v1", ts("2025-01-10T00:00:00Z"))];
        let incidents = vec![
            IncidentRecord {
                key: "INC-1".to_string(),
                created: ts("2025-01-10T02:00:00Z"),
                resolved: Some(ts("2025-01-10T03:00:00Z")),
                resolution_time_hours: None,
                related_deployment: None,
            },
            IncidentRecord {
                key: "INC-OLD".to_string(),
                created: ts("2024-06-01T00:00:00Z"),
                resolved: Some(ts("2024-06-20T00:00:00Z")),
                resolution_time_hours: None,
                related_deployment: None,
            },
        ];

        let report = compute_dora(
            &deployments,
            &[],
            Some(&incidents),
            &BTreeMap::new(),
            DoraOptions {
                window: Some(window),
                as_of: ts("2025-02-01T00:00:00Z"),
            },
        );

        assert_eq!(report.measurement_period_days, 30);
        assert_eq!(report.change_failure_rate.rate_percent, Some(100.0));
        assert_eq!(report.mttr.median_hours, Some(1.0));
        assert_eq!(report.mttr.resolved_incidents, 1);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let start = ts("2025-01-01T00:00:00Z");
        let deployments = vec![make_deployment("v1", start + Duration::hours(12))];
        let changes = vec![make_merged("1", start)];
        let options = DoraOptions {
            window: None,
            as_of: start,
        };

        let a = compute_dora(&deployments, &changes, Some(&[]), &BTreeMap::new(), options);
        let b = compute_dora(&deployments, &changes, Some(&[]), &BTreeMap::new(), options);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

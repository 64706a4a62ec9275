use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_records::DeploymentRecord;
use serde::{Deserialize, Serialize};

use super::classify::{classify_deployment_frequency, DoraLevel};
use crate::stats::iso_week_label;
use crate::window::DateWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentFrequency {
    pub total_deployments: usize,
    pub per_day: f64,
    pub per_week: f64,
    pub per_month: f64,
    pub level: DoraLevel,
    /// Every environment, not only production.
    pub deployments_by_environment: BTreeMap<String, usize>,
    /// ISO week → production deployments.
    pub trend: BTreeMap<String, usize>,
    pub window: DateWindow,
    pub period_days: i64,
}

/// Production deployments inside `window`, oldest first.
pub fn production_deployments<'a>(
    deployments: &'a [DeploymentRecord],
    window: Option<&DateWindow>,
) -> Vec<&'a DeploymentRecord> {
    let mut production: Vec<&DeploymentRecord> = deployments
        .iter()
        .filter(|d| d.is_production())
        .filter(|d| window.map_or(true, |w| w.contains(d.published_at)))
        .collect();
    production.sort_by(|a, b| {
        a.published_at
            .cmp(&b.published_at)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    production
}

/// Count production deployments over `window` (or the span of the data,
/// or the default trailing window ending at `as_of`).
pub fn analyze_deployments(
    deployments: &[DeploymentRecord],
    window: Option<DateWindow>,
    as_of: DateTime<Utc>,
) -> DeploymentFrequency {
    let window = DateWindow::resolve(window, deployments.iter().map(|d| d.published_at), as_of);
    let period_days = window.days();

    let production = production_deployments(deployments, Some(&window));
    let total_deployments = production.len();

    let total = total_deployments as f64;
    let days = period_days as f64;
    let per_day = total / days;
    let per_week = total * 7.0 / days;
    let per_month = total * 30.0 / days;

    let mut deployments_by_environment: BTreeMap<String, usize> = BTreeMap::new();
    for deployment in deployments.iter().filter(|d| window.contains(d.published_at)) {
        *deployments_by_environment
            .entry(deployment.environment.clone())
            .or_default() += 1;
    }

    let mut trend: BTreeMap<String, usize> = BTreeMap::new();
    for deployment in &production {
        *trend.entry(iso_week_label(deployment.published_at)).or_default() += 1;
    }

    tracing::debug!(
        total = total_deployments,
        period_days,
        per_day,
        "deployment frequency computed"
    );

    DeploymentFrequency {
        total_deployments,
        per_day,
        per_week,
        per_month,
        level: classify_deployment_frequency(per_day, per_week, per_month),
        deployments_by_environment,
        trend,
        window,
        period_days,
    }
}

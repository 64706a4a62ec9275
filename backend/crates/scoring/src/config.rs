use std::collections::BTreeMap;

use pulse_common::error::{PulseError, PulseResult};
use pulse_metrics::bundle::{
    CHANGE_FAILURE_RATE, COMMITS, CYCLE_TIME, DEPLOYMENT_FREQUENCY, JIRA_COMPLETED, LEAD_TIME,
    MERGE_RATE, MTTR, PRS, REVIEWS,
};
use serde::{Deserialize, Serialize};

/// Base activity weights.
pub const BASE_WEIGHTS: &[(&str, f64)] = &[
    (PRS, 0.15),
    (REVIEWS, 0.15),
    (COMMITS, 0.10),
    (CYCLE_TIME, 0.10),
    (JIRA_COMPLETED, 0.15),
    (MERGE_RATE, 0.05),
];

/// DORA weights, added on top of the base set.
pub const DORA_WEIGHTS: &[(&str, f64)] = &[
    (DEPLOYMENT_FREQUENCY, 0.10),
    (LEAD_TIME, 0.10),
    (CHANGE_FAILURE_RATE, 0.05),
    (MTTR, 0.05),
];

/// Metrics where a smaller value is better; scored as `100 - normalized`.
pub const LOWER_IS_BETTER: &[&str] = &[CYCLE_TIME, LEAD_TIME, CHANGE_FAILURE_RATE, MTTR];

/// Volume metrics divided by team size for per-capita comparison.
pub const PER_CAPITA: &[&str] = &[PRS, REVIEWS, COMMITS, JIRA_COMPLETED];

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Metric name → weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreWeights(BTreeMap<String, f64>);

impl Default for ScoreWeights {
    fn default() -> Self {
        Self(
            BASE_WEIGHTS
                .iter()
                .chain(DORA_WEIGHTS)
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        )
    }
}

impl ScoreWeights {
    pub fn new(weights: BTreeMap<String, f64>) -> Self {
        Self(weights)
    }

    /// Only the base activity weights, for entities without DORA data.
    pub fn base() -> Self {
        Self(
            BASE_WEIGHTS
                .iter()
                .map(|(name, weight)| (name.to_string(), *weight))
                .collect(),
        )
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Each weight within [0, 1] and the total within 1.0 ± 0.001.
    pub fn validate(&self) -> PulseResult<()> {
        for (name, weight) in &self.0 {
            if !(0.0..=1.0).contains(weight) {
                return Err(PulseError::Validation(format!(
                    "weight for {name} must be within [0, 1], got {weight}"
                )));
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PulseError::Validation(format!(
                "weights must sum to 1.0, got {total:.4}"
            )));
        }
        Ok(())
    }
}

pub fn is_lower_better(metric: &str) -> bool {
    LOWER_IS_BETTER.contains(&metric)
}

pub fn is_per_capita(metric: &str) -> bool {
    PER_CAPITA.contains(&metric)
}

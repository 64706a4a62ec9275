use serde::{Deserialize, Serialize};

/// How one metric contributed to a performance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: String,
    /// Entity value after per-capita adjustment.
    pub value: f64,
    pub population_min: f64,
    pub population_max: f64,
    /// 0–100, already inverted for lower-is-better metrics.
    pub normalized: f64,
    pub inverted: bool,
    pub weight: f64,
    pub weighted_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub contributions: Vec<MetricContribution>,
    /// Metrics named in the weights but unmeasured for this entity or
    /// the whole population.
    pub skipped: Vec<String>,
    pub applied_weight: f64,
    pub raw_total: f64,
}

use chrono::{DateTime, Utc};
use pulse_metrics::{ActivityReport, DoraReport, IssueMetrics, MetricBundle};
use pulse_scoring::{RankedEntity, ScoreTrace};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamReport {
    pub name: String,
    pub display_name: String,
    pub team_size: usize,
    pub rank: usize,
    pub score: f64,
    pub activity: ActivityReport,
    pub dora: DoraReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<IssueMetrics>,
    pub metrics: MetricBundle,
    pub score_trace: ScoreTrace,
}

/// One run's output: teams ordered by rank, then the individual ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub teams: Vec<TeamReport>,
    pub individuals: Vec<RankedEntity>,
}

/// DORA maturity classification.
///
/// Per-metric thresholds:
///   - deployment frequency: elite ≥1/day, high ≥1/week, medium ≥1/month
///   - lead time: elite <24h, high <7d, medium <30d
///   - change failure rate: elite ≤15%, high ≤30%, medium ≤45%
///   - time to restore: elite <1h, high <24h, medium <7d
///
/// Anything worse is low.
use serde::{Deserialize, Serialize};

pub const LEAD_TIME_ELITE_HOURS: f64 = 24.0;
pub const LEAD_TIME_HIGH_HOURS: f64 = 7.0 * 24.0;
pub const LEAD_TIME_MEDIUM_HOURS: f64 = 30.0 * 24.0;

pub const CFR_ELITE_PERCENT: f64 = 15.0;
pub const CFR_HIGH_PERCENT: f64 = 30.0;
pub const CFR_MEDIUM_PERCENT: f64 = 45.0;

pub const MTTR_ELITE_HOURS: f64 = 1.0;
pub const MTTR_HIGH_HOURS: f64 = 24.0;
pub const MTTR_MEDIUM_HOURS: f64 = 7.0 * 24.0;

/// Ordered worst to best so comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoraLevel {
    Low,
    Medium,
    High,
    Elite,
}

impl DoraLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoraLevel::Low => "low",
            DoraLevel::Medium => "medium",
            DoraLevel::High => "high",
            DoraLevel::Elite => "elite",
        }
    }

    /// Capitalised form used for the overall rating.
    pub fn label(&self) -> &'static str {
        match self {
            DoraLevel::Low => "Low",
            DoraLevel::Medium => "Medium",
            DoraLevel::High => "High",
            DoraLevel::Elite => "Elite",
        }
    }
}

impl std::fmt::Display for DoraLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify_deployment_frequency(per_day: f64, per_week: f64, per_month: f64) -> DoraLevel {
    if per_day >= 1.0 {
        DoraLevel::Elite
    } else if per_week >= 1.0 {
        DoraLevel::High
    } else if per_month >= 1.0 {
        DoraLevel::Medium
    } else {
        DoraLevel::Low
    }
}

pub fn classify_lead_time(median_hours: f64) -> DoraLevel {
    if median_hours < LEAD_TIME_ELITE_HOURS {
        DoraLevel::Elite
    } else if median_hours < LEAD_TIME_HIGH_HOURS {
        DoraLevel::High
    } else if median_hours < LEAD_TIME_MEDIUM_HOURS {
        DoraLevel::Medium
    } else {
        DoraLevel::Low
    }
}

pub fn classify_change_failure_rate(rate_percent: f64) -> DoraLevel {
    if rate_percent <= CFR_ELITE_PERCENT {
        DoraLevel::Elite
    } else if rate_percent <= CFR_HIGH_PERCENT {
        DoraLevel::High
    } else if rate_percent <= CFR_MEDIUM_PERCENT {
        DoraLevel::Medium
    } else {
        DoraLevel::Low
    }
}

pub fn classify_mttr(median_hours: f64) -> DoraLevel {
    if median_hours < MTTR_ELITE_HOURS {
        DoraLevel::Elite
    } else if median_hours < MTTR_HIGH_HOURS {
        DoraLevel::High
    } else if median_hours < MTTR_MEDIUM_HOURS {
        DoraLevel::Medium
    } else {
        DoraLevel::Low
    }
}

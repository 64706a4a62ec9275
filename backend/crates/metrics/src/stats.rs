use chrono::{DateTime, Datelike, Utc};

/// Arithmetic mean of the finite values. `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Median of the finite values, any order. `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    percentile_of(values, 50.0)
}

/// Percentile of unsorted values (sorts a copy, drops non-finite values).
pub fn percentile_of(values: &[f64], pct: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    percentile(&sorted, pct)
}

/// Compute a percentile from a sorted-ascending slice. Returns None for empty input.
pub fn percentile(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let k = (pct / 100.0) * (sorted.len() as f64 - 1.0);
    let floor = k.floor() as usize;
    let ceil = k.ceil() as usize;
    if floor == ceil {
        Some(sorted[floor])
    } else {
        let d = k - floor as f64;
        Some(sorted[floor] * (1.0 - d) + sorted[ceil] * d)
    }
}

/// `numerator / denominator`, or 0 when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Hours between two instants, with sub-hour precision.
pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// ISO-8601 week label, e.g. `2025-W01`. Uses the ISO week-numbering year,
/// so 2024-12-30 falls in `2025-W01`.
pub fn iso_week_label(at: DateTime<Utc>) -> String {
    let week = at.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

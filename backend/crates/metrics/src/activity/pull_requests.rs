use pulse_records::{ChangeRecord, ChangeState};
use serde::{Deserialize, Serialize};

use crate::stats::{mean, median, ratio};

/// Size bucket bounds on combined added + deleted lines.
pub const SMALL_PR_MAX: i64 = 100;
pub const MEDIUM_PR_MAX: i64 = 500;
pub const LARGE_PR_MAX: i64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeDistribution {
    pub small: usize,
    pub medium: usize,
    pub large: usize,
    pub xlarge: usize,
}

impl SizeDistribution {
    fn record(&mut self, size: i64) {
        if size < SMALL_PR_MAX {
            self.small += 1;
        } else if size < MEDIUM_PR_MAX {
            self.medium += 1;
        } else if size <= LARGE_PR_MAX {
            self.large += 1;
        } else {
            self.xlarge += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrMetrics {
    pub total_prs: usize,
    pub merged_prs: usize,
    pub open_prs: usize,
    pub closed_unmerged_prs: usize,
    pub merge_rate: f64,
    pub avg_pr_size: f64,
    pub pr_size_distribution: SizeDistribution,
    pub avg_cycle_time_hours: f64,
    pub median_cycle_time_hours: f64,
    /// Merged changes that carried a cycle time.
    pub cycle_time_sample_size: usize,
    pub avg_time_to_first_review_hours: f64,
}

/// Roll up pull requests. A change counts as merged when its `merged` flag
/// is set; otherwise it is open or closed-unmerged by state, so the three
/// counts always partition the total.
pub fn compute_pr_metrics(changes: &[ChangeRecord]) -> PrMetrics {
    let total_prs = changes.len();
    let merged_prs = changes.iter().filter(|c| c.merged).count();
    let open_prs = changes
        .iter()
        .filter(|c| !c.merged && c.state == ChangeState::Open)
        .count();
    let closed_unmerged_prs = total_prs - merged_prs - open_prs;

    let mut pr_size_distribution = SizeDistribution::default();
    for change in changes {
        pr_size_distribution.record(change.size());
    }
    let total_size: i64 = changes.iter().map(ChangeRecord::size).sum();

    let cycle_times: Vec<f64> = changes
        .iter()
        .filter(|c| c.merged)
        .filter_map(|c| c.cycle_time_hours)
        .collect();

    let first_review: Vec<f64> = changes
        .iter()
        .filter_map(|c| c.time_to_first_review_hours)
        .collect();

    PrMetrics {
        total_prs,
        merged_prs,
        open_prs,
        closed_unmerged_prs,
        merge_rate: ratio(merged_prs as f64, total_prs as f64),
        avg_pr_size: ratio(total_size as f64, total_prs as f64),
        pr_size_distribution,
        avg_cycle_time_hours: mean(&cycle_times).unwrap_or(0.0),
        median_cycle_time_hours: median(&cycle_times).unwrap_or(0.0),
        cycle_time_sample_size: cycle_times.len(),
        avg_time_to_first_review_hours: mean(&first_review).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_pr(merged: bool, state: ChangeState, size: i64, cycle: Option<f64>) -> ChangeRecord {
        ChangeRecord {
            id: "1".to_string(),
            title: String::new(),
            author: "alice".to_string(),
            merged,
            state,
            additions: size,
            deletions: 0,
            created_at: Utc::now(),
            merged_at: if merged { Some(Utc::now()) } else { None },
            cycle_time_hours: cycle,
            time_to_first_review_hours: None,
        }
    }

    #[test]
    fn counts_and_merge_rate() {
        let prs = vec![
            make_pr(true, ChangeState::Merged, 10, None),
            make_pr(true, ChangeState::Merged, 10, None),
            make_pr(false, ChangeState::Open, 10, None),
            make_pr(true, ChangeState::Merged, 10, None),
        ];
        let m = compute_pr_metrics(&prs);
        assert_eq!(m.total_prs, 4);
        assert_eq!(m.merged_prs, 3);
        assert_eq!(m.open_prs, 1);
        assert_eq!(m.closed_unmerged_prs, 0);
        assert!((m.merge_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn closed_unmerged_completes_partition() {
        let prs = vec![
            make_pr(false, ChangeState::Closed, 10, None),
            make_pr(false, ChangeState::Open, 10, None),
            make_pr(true, ChangeState::Merged, 10, None),
        ];
        let m = compute_pr_metrics(&prs);
        assert_eq!(m.closed_unmerged_prs, 1);
        assert_eq!(m.merged_prs + m.open_prs + m.closed_unmerged_prs, m.total_prs);
    }

    #[test]
    fn cycle_time_skips_missing_values() {
        let prs = vec![
            make_pr(true, ChangeState::Merged, 10, Some(24.0)),
            make_pr(true, ChangeState::Merged, 10, Some(48.0)),
            make_pr(true, ChangeState::Merged, 10, None),
            make_pr(true, ChangeState::Merged, 10, Some(36.0)),
        ];
        let m = compute_pr_metrics(&prs);
        assert!((m.avg_cycle_time_hours - 36.0).abs() < 0.001);
        assert!((m.median_cycle_time_hours - 36.0).abs() < 0.001);
        assert_eq!(m.cycle_time_sample_size, 3);
    }

    #[test]
    fn cycle_time_ignored_for_unmerged() {
        let prs = vec![make_pr(false, ChangeState::Open, 10, Some(100.0))];
        let m = compute_pr_metrics(&prs);
        assert_eq!(m.avg_cycle_time_hours, 0.0);
        assert_eq!(m.cycle_time_sample_size, 0);
    }

    #[test]
    fn size_buckets_follow_bounds() {
        let prs: Vec<ChangeRecord> = [99, 100, 499, 500, 1000, 1001]
            .iter()
            .map(|s| make_pr(false, ChangeState::Open, *s, None))
            .collect();
        let m = compute_pr_metrics(&prs);
        assert_eq!(
            m.pr_size_distribution,
            SizeDistribution {
                small: 1,
                medium: 2,
                large: 2,
                xlarge: 1
            }
        );
        assert!((m.avg_pr_size - 3199.0 / 6.0).abs() < 0.001);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let m = compute_pr_metrics(&[]);
        assert_eq!(m.total_prs, 0);
        assert_eq!(m.merge_rate, 0.0);
        assert_eq!(m.avg_pr_size, 0.0);
        assert_eq!(m.median_cycle_time_hours, 0.0);
        assert_eq!(m.avg_time_to_first_review_hours, 0.0);
    }
}

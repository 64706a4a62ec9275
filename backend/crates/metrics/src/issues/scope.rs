use std::collections::BTreeMap;

use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

use super::weekly_counts;
use crate::window::DateWindow;

/// Trends are `None` when no scope filter results were supplied, which is
/// distinct from supplied results with nothing inside the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeMetrics {
    pub total: usize,
    pub trend_created: Option<BTreeMap<String, usize>>,
    pub trend_resolved: Option<BTreeMap<String, usize>>,
}

pub fn analyze_scope(scope: Option<&[IssueRecord]>, window: &DateWindow) -> ScopeMetrics {
    match scope {
        Some(issues) if !issues.is_empty() => ScopeMetrics {
            total: issues.len(),
            trend_created: Some(weekly_counts(issues, Some(window), IssueRecord::created_at)),
            trend_resolved: Some(weekly_counts(issues, Some(window), IssueRecord::resolved_at)),
        },
        _ => ScopeMetrics::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::fixtures::{make_issue, with_dates};

    fn window() -> DateWindow {
        DateWindow::trailing("2025-03-31T00:00:00Z".parse().unwrap(), 90)
    }

    #[test]
    fn absent_or_empty_scope_is_default() {
        assert_eq!(analyze_scope(None, &window()), ScopeMetrics::default());
        assert_eq!(analyze_scope(Some(&[]), &window()), ScopeMetrics::default());
        let json = serde_json::to_value(ScopeMetrics::default()).unwrap();
        assert!(json["trend_created"].is_null());
    }

    #[test]
    fn supplied_scope_has_trend_maps_even_if_empty() {
        let issues = vec![with_dates(make_issue("S-1", "Open"), Some("2020-01-01"), None)];
        let m = analyze_scope(Some(&issues), &window());
        assert_eq!(m.total, 1);
        assert_eq!(m.trend_created, Some(BTreeMap::new()));
        assert_eq!(m.trend_resolved, Some(BTreeMap::new()));
    }

    #[test]
    fn buckets_created_and_resolved() {
        let issues = vec![
            with_dates(make_issue("S-1", "Done"), Some("2025-03-03"), Some("2025-03-10")),
            with_dates(make_issue("S-2", "Open"), Some("2025-03-04"), None),
        ];
        let m = analyze_scope(Some(&issues), &window());
        assert_eq!(m.trend_created.unwrap().get("2025-W10"), Some(&2));
        assert_eq!(m.trend_resolved.unwrap().get("2025-W11"), Some(&1));
    }
}

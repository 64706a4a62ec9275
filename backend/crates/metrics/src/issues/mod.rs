//! Issue-tracker analytics over named filter result sets.

pub mod blocked;
pub mod bugs;
pub mod incidents;
pub mod scope;
pub mod throughput;
pub mod wip;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_records::{IssueFilterResults, IssueRecord};
use serde::{Deserialize, Serialize};

pub use blocked::{analyze_flagged, FlaggedIssue, FlaggedMetrics};
pub use bugs::{analyze_bugs, BugMetrics};
pub use incidents::{analyze_incidents, IncidentIssue, IncidentSummary};
pub use scope::{analyze_scope, ScopeMetrics};
pub use throughput::{analyze_throughput, Throughput};
pub use wip::{analyze_wip, AgeBuckets, WipMetrics};

use crate::stats::iso_week_label;
use crate::window::{DateWindow, DEFAULT_WINDOW_DAYS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssueAnalysisOptions {
    /// End of the trailing window for bug and scope trends.
    pub as_of: DateTime<Utc>,
    pub trailing_days: i64,
}

impl IssueAnalysisOptions {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            trailing_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn trailing_window(&self) -> DateWindow {
        DateWindow::trailing(self.as_of, self.trailing_days)
    }
}

/// Sections are present only for the filters that were supplied, so an
/// empty input serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<Throughput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wip: Option<WipMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<FlaggedMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bugs: Option<BugMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents: Option<IncidentSummary>,
}

impl IssueMetrics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn analyze_issues(results: &IssueFilterResults, options: IssueAnalysisOptions) -> IssueMetrics {
    if results.is_empty() {
        return IssueMetrics::default();
    }

    let window = options.trailing_window();
    let bugs = if results.bugs_created.is_some() || results.bugs_resolved.is_some() {
        Some(analyze_bugs(
            results.bugs_created.as_deref().unwrap_or_default(),
            results.bugs_resolved.as_deref().unwrap_or_default(),
            &window,
        ))
    } else {
        None
    };

    IssueMetrics {
        throughput: results.completed.as_deref().map(analyze_throughput),
        wip: results.wip.as_deref().map(analyze_wip),
        flagged: results.flagged_blocked.as_deref().map(analyze_flagged),
        bugs,
        scope: Some(analyze_scope(results.scope.as_deref(), &window)),
        incidents: results.incidents.as_deref().map(analyze_incidents),
    }
}

/// Count issues per ISO week of the date picked by `date_of`, keeping only
/// dates inside `window`. Unparseable dates are skipped.
pub(crate) fn weekly_counts<F>(
    issues: &[IssueRecord],
    window: Option<&DateWindow>,
    date_of: F,
) -> BTreeMap<String, usize>
where
    F: Fn(&IssueRecord) -> Option<DateTime<Utc>>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for issue in issues {
        let Some(at) = date_of(issue) else {
            continue;
        };
        if window.map_or(true, |w| w.contains(at)) {
            *counts.entry(iso_week_label(at)).or_default() += 1;
        }
    }
    counts
}

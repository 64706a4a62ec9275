use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{deserialize_optional_timestamp, deserialize_timestamp, parse_optional};

/// Assignee label used when an issue has nobody assigned.
pub const UNASSIGNED: &str = "Unassigned";

/// A row from an issue-tracker filter. Timestamps are kept raw so a single
/// malformed value never rejects the whole result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRecord {
    pub key: String,
    #[serde(rename = "type", default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub resolved: Option<String>,
    #[serde(default)]
    pub days_in_current_status: Option<f64>,
}

impl IssueRecord {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.created.as_deref())
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.resolved.as_deref())
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn assignee_or_default(&self) -> String {
        self.assignee
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNASSIGNED)
            .to_string()
    }
}

/// Result sets of the named issue-tracker filters. An absent filter is
/// `None`; a filter that ran and matched nothing is `Some(vec![])`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFilterResults {
    #[serde(default)]
    pub completed: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub wip: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub flagged_blocked: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub bugs_created: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub bugs_resolved: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub scope: Option<Vec<IssueRecord>>,
    #[serde(default)]
    pub incidents: Option<Vec<IssueRecord>>,
}

impl IssueFilterResults {
    pub fn is_empty(&self) -> bool {
        self.completed.is_none()
            && self.wip.is_none()
            && self.flagged_blocked.is_none()
            && self.bugs_created.is_none()
            && self.bugs_resolved.is_none()
            && self.scope.is_none()
            && self.incidents.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub key: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub resolved: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolution_time_hours: Option<f64>,
    /// Tag of the deployment that caused the incident, when known.
    #[serde(default)]
    pub related_deployment: Option<String>,
}

impl IncidentRecord {
    /// Build an incident from an issue-tracker row. Rows without a parseable
    /// creation date cannot be placed in time and yield `None`.
    pub fn from_issue(issue: &IssueRecord) -> Option<Self> {
        let created = issue.created_at()?;
        Some(Self {
            key: issue.key.clone(),
            created,
            resolved: issue.resolved_at(),
            resolution_time_hours: None,
            related_deployment: None,
        })
    }

    /// Hours to resolution: the explicit value if present, else derived from
    /// created/resolved. Unresolved incidents yield `None`.
    pub fn resolution_hours(&self) -> Option<f64> {
        if let Some(hours) = self.resolution_time_hours {
            return Some(hours);
        }
        self.resolved
            .map(|resolved| (resolved - self.created).num_seconds() as f64 / 3600.0)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some() || self.resolution_time_hours.is_some()
    }
}

use pulse_records::IssueRecord;
use serde::{Deserialize, Serialize};

pub const RECENT_INCIDENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentIssue {
    pub key: String,
    pub summary: Option<String>,
    pub status: String,
    pub assignee: String,
    pub created: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    /// First ten in filter order.
    pub recent: Vec<IncidentIssue>,
}

pub fn analyze_incidents(incidents: &[IssueRecord]) -> IncidentSummary {
    let resolved = incidents.iter().filter(|i| i.is_resolved()).count();
    IncidentSummary {
        total: incidents.len(),
        open: incidents.len() - resolved,
        resolved,
        recent: incidents
            .iter()
            .take(RECENT_INCIDENT_LIMIT)
            .map(|issue| IncidentIssue {
                key: issue.key.clone(),
                summary: issue.summary.clone(),
                status: issue.status.clone(),
                assignee: issue.assignee_or_default(),
                created: issue.created.clone(),
            })
            .collect(),
    }
}

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dates::{skip_malformed, skip_malformed_optional};
use crate::github::models::{ChangeRecord, CommitRecord, DeploymentRecord, ReviewRecord};
use crate::jira::models::{IncidentRecord, IssueFilterResults};

/// Every record collection handed to the metrics engine for one run. Rows
/// that fail to deserialize (for example an unparseable required timestamp)
/// are dropped individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub changes: Vec<ChangeRecord>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub commits: Vec<CommitRecord>,
    #[serde(default, deserialize_with = "skip_malformed")]
    pub deployments: Vec<DeploymentRecord>,
    /// `None` means no incident source is configured, not "zero incidents".
    #[serde(default, deserialize_with = "skip_malformed_optional")]
    pub incidents: Option<Vec<IncidentRecord>>,
    /// Issue key → deployment tag.
    #[serde(default)]
    pub issue_to_deployment_map: BTreeMap<String, String>,
    /// Issue-tracker filter results keyed by team name.
    #[serde(default)]
    pub issues: BTreeMap<String, IssueFilterResults>,
}

impl Dataset {
    /// Restrict person-attributed records to `members`. Deployments,
    /// incidents and the issue mapping are repository-wide and kept whole.
    pub fn for_members(&self, members: &BTreeSet<String>) -> Dataset {
        Dataset {
            changes: self
                .changes
                .iter()
                .filter(|c| members.contains(&c.author))
                .cloned()
                .collect(),
            reviews: self
                .reviews
                .iter()
                .filter(|r| members.contains(&r.reviewer))
                .cloned()
                .collect(),
            commits: self
                .commits
                .iter()
                .filter(|c| members.contains(&c.author))
                .cloned()
                .collect(),
            deployments: self.deployments.clone(),
            incidents: self.incidents.clone(),
            issue_to_deployment_map: self.issue_to_deployment_map.clone(),
            issues: self.issues.clone(),
        }
    }

    /// Everyone who authored, reviewed or committed something.
    pub fn contributors(&self) -> BTreeSet<String> {
        self.changes
            .iter()
            .map(|c| c.author.clone())
            .chain(self.reviews.iter().map(|r| r.reviewer.clone()))
            .chain(self.commits.iter().map(|c| c.author.clone()))
            .filter(|name| !name.trim().is_empty())
            .collect()
    }
}

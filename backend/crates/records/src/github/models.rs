use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{deserialize_optional_timestamp, deserialize_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeState {
    Open,
    Merged,
    Closed,
}

/// A pull request as delivered by the collection layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub merged: bool,
    pub state: ChangeState,
    #[serde(default)]
    pub additions: i64,
    #[serde(default)]
    pub deletions: i64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub merged_at: Option<DateTime<Utc>>,
    /// Only meaningful for merged changes.
    #[serde(default)]
    pub cycle_time_hours: Option<f64>,
    #[serde(default)]
    pub time_to_first_review_hours: Option<f64>,
}

impl ChangeRecord {
    /// Combined added + deleted lines.
    pub fn size(&self) -> i64 {
        self.additions + self.deletions
    }

    /// Merge timestamp, present only when the change is actually merged.
    pub fn merged_time(&self) -> Option<DateTime<Utc>> {
        if self.merged {
            self.merged_at
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewer: String,
    pub pr_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub additions: i64,
    #[serde(default)]
    pub deletions: i64,
}

pub const PRODUCTION_ENVIRONMENT: &str = "production";

/// A release published to an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub tag: String,
    pub environment: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub repo: String,
}

impl DeploymentRecord {
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_change_with_missing_optionals() {
        let json = r#"{
            "id": "42",
            "author": "alice",
            "state": "open",
            "created_at": "2025-01-01T10:00:00Z"
        }"#;
        let pr: ChangeRecord = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(pr.state, ChangeState::Open);
        assert!(!pr.merged);
        assert_eq!(pr.size(), 0);
        assert!(pr.cycle_time_hours.is_none());
        assert!(pr.merged_time().is_none());
    }

    #[test]
    fn merged_time_requires_merged_flag() {
        let json = r#"{
            "id": "7",
            "author": "bob",
            "state": "closed",
            "merged": false,
            "created_at": "2025-01-01T10:00:00Z",
            "merged_at": "2025-01-02T10:00:00Z"
        }"#;
        let pr: ChangeRecord = serde_json::from_str(json).unwrap();
        assert!(pr.merged_time().is_none());
    }

    #[test]
    fn only_production_environment_counts() {
        let json = r#"[
            {"tag": "v1", "environment": "production", "published_at": "2025-01-01T00:00:00Z"},
            {"tag": "v1-rc", "environment": "staging", "published_at": "2025-01-01T00:00:00Z"},
            {"tag": "v2", "environment": "Production", "published_at": "2025-01-01T00:00:00Z"}
        ]"#;
        let deps: Vec<DeploymentRecord> = serde_json::from_str(json).unwrap();
        let prod: Vec<_> = deps.iter().filter(|d| d.is_production()).collect();
        assert_eq!(prod.len(), 1);
        assert_eq!(prod[0].tag, "v1");
    }
}

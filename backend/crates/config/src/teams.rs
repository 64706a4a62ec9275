use std::collections::{BTreeMap, BTreeSet};

use pulse_common::error::{PulseError, PulseResult};
use serde::{Deserialize, Serialize};

/// Name of the implicit team used when no team file is configured.
pub const DEFAULT_TEAM: &str = "all";

/// One team's entry in the team file, in either accepted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamEntry {
    /// Legacy flat shape: `"backend": ["alice", "bob"]`.
    Members(Vec<String>),
    /// Nested shape: `"backend": {"members": [...], "display_name": "..."}`.
    Detailed {
        members: Vec<String>,
        #[serde(default)]
        display_name: Option<String>,
    },
}

/// Raw team file: team name → entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamsConfig(pub BTreeMap<String, TeamEntry>);

/// Normalized team, independent of the file shape it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDefinition {
    pub name: String,
    pub display_name: String,
    pub members: BTreeSet<String>,
}

impl TeamsConfig {
    pub fn from_json(raw: &str) -> PulseResult<Self> {
        serde_json::from_str(raw).map_err(|e| PulseError::Config(format!("invalid team file: {e}")))
    }
}

/// Resolve every entry into a [`TeamDefinition`], ordered by team name.
pub fn resolve_teams(config: &TeamsConfig) -> PulseResult<Vec<TeamDefinition>> {
    config
        .0
        .iter()
        .map(|(name, entry)| {
            let (members, display_name) = match entry {
                TeamEntry::Members(members) => (members, None),
                TeamEntry::Detailed {
                    members,
                    display_name,
                } => (members, display_name.as_deref()),
            };

            let members: BTreeSet<String> = members
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
                .collect();
            if members.is_empty() {
                return Err(PulseError::Validation(format!("team '{name}' has no members")));
            }

            Ok(TeamDefinition {
                name: name.clone(),
                display_name: display_name
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or(name.as_str())
                    .to_owned(),
                members,
            })
        })
        .collect()
}

/// Single catch-all team over `contributors`.
pub fn default_team(contributors: BTreeSet<String>) -> TeamDefinition {
    TeamDefinition {
        name: DEFAULT_TEAM.to_owned(),
        display_name: DEFAULT_TEAM.to_owned(),
        members: contributors,
    }
}

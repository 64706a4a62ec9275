pub mod dataset;
pub mod dates;
pub mod github;
pub mod jira;

pub use dataset::Dataset;
pub use github::models::{ChangeRecord, ChangeState, CommitRecord, DeploymentRecord, ReviewRecord};
pub use jira::models::{IncidentRecord, IssueFilterResults, IssueRecord};

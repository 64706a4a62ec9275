//! Metrics engine: turns raw pull-request, review, commit, release and
//! issue-tracker records into activity rollups, DORA indicators and issue
//! analytics. Every entry point is a pure function of its inputs.

pub mod activity;
pub mod bundle;
pub mod dora;
pub mod issues;
pub mod keys;
pub mod stats;
pub mod window;

pub use activity::{compute_activity, ActivityReport};
pub use bundle::MetricBundle;
pub use dora::{compute_dora, DoraLevel, DoraOptions, DoraReport};
pub use issues::{analyze_issues, IssueAnalysisOptions, IssueMetrics};
pub use window::DateWindow;

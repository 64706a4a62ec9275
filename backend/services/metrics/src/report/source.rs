use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pulse_common::error::{PulseError, PulseResult};
use pulse_config::TeamsConfig;
use pulse_records::Dataset;

/// Where the collected records and team definitions come from.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load_dataset(&self) -> PulseResult<Dataset>;
    /// `None` when no team file is configured.
    async fn load_teams(&self) -> PulseResult<Option<TeamsConfig>>;
}

/// Reads the dataset (and optional team file) from JSON on disk.
pub struct JsonFileSource {
    dataset_path: PathBuf,
    teams_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(dataset_path: impl Into<PathBuf>, teams_path: Option<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            teams_path,
        }
    }
}

async fn read_file(path: &Path) -> PulseResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => PulseError::NotFound(format!("{}", path.display())),
        _ => PulseError::Io(format!("{}: {e}", path.display())),
    })
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    async fn load_dataset(&self) -> PulseResult<Dataset> {
        let raw = read_file(&self.dataset_path).await?;
        let dataset: Dataset = serde_json::from_str(&raw).map_err(|e| {
            PulseError::Parse(format!("{}: {e}", self.dataset_path.display()))
        })?;
        tracing::info!(
            path = %self.dataset_path.display(),
            changes = dataset.changes.len(),
            reviews = dataset.reviews.len(),
            commits = dataset.commits.len(),
            deployments = dataset.deployments.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    async fn load_teams(&self) -> PulseResult<Option<TeamsConfig>> {
        let Some(path) = &self.teams_path else {
            return Ok(None);
        };
        let raw = read_file(path).await?;
        TeamsConfig::from_json(&raw).map(Some)
    }
}

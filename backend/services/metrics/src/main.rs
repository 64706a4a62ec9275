mod report;

use std::path::PathBuf;

use chrono::Utc;
use pulse_common::error::PulseResult;
use pulse_config::{init_tracing, AppConfig};

use report::service::{ReportService, ReportSettings};
use report::source::JsonFileSource;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            tracing::error!(error = %err, "failed to load config");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    if let Err(err) = run(config).await {
        tracing::error!(error = %err, "metrics run failed");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> PulseResult<()> {
    tracing::info!(service = "pulse-metrics", dataset = %config.dataset_path, "starting");

    let settings = ReportSettings::from_config(&config, Utc::now())?;
    let source = JsonFileSource::new(&config.dataset_path, config.teams_path.as_ref().map(PathBuf::from));
    let report = ReportService::new(source, settings).build_report().await?;

    let json = serde_json::to_string_pretty(&report)?;
    match &config.output_path {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            tracing::info!(path = %path, teams = report.teams.len(), "report written");
        }
        None => println!("{json}"),
    }

    tracing::info!(report_id = %report.id, "done");
    Ok(())
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pulse_common::error::PulseResult;
use pulse_config::{default_team, resolve_teams, AppConfig, TeamDefinition};
use pulse_metrics::{
    analyze_issues, compute_activity, compute_dora, ActivityReport, DateWindow, DoraOptions,
    DoraReport, IssueAnalysisOptions, IssueMetrics, MetricBundle,
};
use pulse_records::{Dataset, IncidentRecord};
use pulse_scoring::{rank_entities, RankedEntity, ScoreWeights};
use uuid::Uuid;

use super::models::{MetricsReport, TeamReport};
use super::source::DatasetSource;

/// Run-wide settings, resolved from [`AppConfig`] once.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub window: Option<DateWindow>,
    pub trailing_days: i64,
    pub as_of: DateTime<Utc>,
    pub weights: Option<ScoreWeights>,
}

impl ReportSettings {
    /// Validates supplied weights. `now` stands in for `AS_OF` when unset.
    pub fn from_config(config: &AppConfig, now: DateTime<Utc>) -> PulseResult<Self> {
        let weights = config.score_weights.clone().map(ScoreWeights::new);
        if let Some(weights) = &weights {
            weights.validate()?;
        }
        Ok(Self {
            window: config
                .window_bounds()
                .map(|(start, end)| DateWindow::new(start, end)),
            trailing_days: config.trailing_days,
            as_of: config.as_of.unwrap_or(now),
            weights,
        })
    }

    fn issue_options(&self) -> IssueAnalysisOptions {
        IssueAnalysisOptions {
            as_of: self.as_of,
            trailing_days: self.trailing_days,
        }
    }
}

struct TeamComputation {
    team: TeamDefinition,
    activity: ActivityReport,
    dora: DoraReport,
    issues: Option<IssueMetrics>,
    bundle: MetricBundle,
}

pub struct ReportService<S: DatasetSource> {
    source: S,
    settings: ReportSettings,
}

impl<S: DatasetSource> ReportService<S> {
    pub fn new(source: S, settings: ReportSettings) -> Self {
        Self { source, settings }
    }

    /// Load the dataset, compute every team's metrics, and rank teams (per
    /// capita) and individuals (activity only).
    pub async fn build_report(&self) -> PulseResult<MetricsReport> {
        let dataset = self.source.load_dataset().await?;
        let teams = match self.source.load_teams().await? {
            Some(config) => resolve_teams(&config)?,
            None => vec![default_team(dataset.contributors())],
        };

        let computations: Vec<TeamComputation> = teams
            .into_iter()
            .map(|team| self.compute_team(&dataset, team))
            .collect();

        let named: Vec<(String, MetricBundle)> = computations
            .iter()
            .map(|c| (c.team.name.clone(), c.bundle.clone()))
            .collect();
        let ranking = rank_entities(&named, true, self.settings.weights.as_ref());

        let mut by_name: BTreeMap<String, TeamComputation> = computations
            .into_iter()
            .map(|c| (c.team.name.clone(), c))
            .collect();
        let teams: Vec<TeamReport> = ranking
            .into_iter()
            .filter_map(|ranked| {
                let c = by_name.remove(&ranked.name)?;
                tracing::info!(
                    team = %c.team.name,
                    score = ranked.score,
                    rank = ranked.rank,
                    dora_level = %c.dora.dora_level,
                    "team scored"
                );
                Some(TeamReport {
                    name: c.team.name,
                    display_name: c.team.display_name,
                    team_size: c.team.members.len(),
                    rank: ranked.rank,
                    score: ranked.score,
                    activity: c.activity,
                    dora: c.dora,
                    issues: c.issues,
                    metrics: c.bundle,
                    score_trace: ranked.trace,
                })
            })
            .collect();

        let individuals = self.rank_individuals(&dataset);

        Ok(MetricsReport {
            id: Uuid::new_v4(),
            computed_at: self.settings.as_of,
            teams,
            individuals,
        })
    }

    fn compute_team(&self, dataset: &Dataset, team: TeamDefinition) -> TeamComputation {
        let subset = dataset.for_members(&team.members);
        let team_issues = dataset.issues.get(&team.name);

        let activity = compute_activity(&subset.changes, &subset.reviews, &subset.commits);

        // Issue-tracker incidents stand in when no dedicated incident feed exists.
        let incidents: Option<Vec<IncidentRecord>> = subset.incidents.clone().or_else(|| {
            team_issues
                .and_then(|results| results.incidents.as_ref())
                .map(|rows| rows.iter().filter_map(IncidentRecord::from_issue).collect())
        });

        let dora = compute_dora(
            &subset.deployments,
            &subset.changes,
            incidents.as_deref(),
            &subset.issue_to_deployment_map,
            DoraOptions {
                window: self.settings.window,
                as_of: self.settings.as_of,
            },
        );

        let issues = team_issues
            .filter(|results| !results.is_empty())
            .map(|results| analyze_issues(results, self.settings.issue_options()));

        let bundle = MetricBundle::from_reports(
            &activity,
            Some(&dora),
            issues.as_ref(),
            Some(team.members.len()),
        );

        tracing::debug!(team = %team.name, members = team.members.len(), "team metrics computed");

        TeamComputation {
            team,
            activity,
            dora,
            issues,
            bundle,
        }
    }

    fn rank_individuals(&self, dataset: &Dataset) -> Vec<RankedEntity> {
        let people: Vec<(String, MetricBundle)> = dataset
            .contributors()
            .into_iter()
            .map(|person| {
                let members = std::iter::once(person.clone()).collect();
                let subset = dataset.for_members(&members);
                let activity =
                    compute_activity(&subset.changes, &subset.reviews, &subset.commits);
                (person, MetricBundle::from_reports(&activity, None, None, None))
            })
            .collect();

        rank_entities(&people, false, Some(&ScoreWeights::base()))
    }
}

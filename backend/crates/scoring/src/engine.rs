use pulse_metrics::stats::round1;
use pulse_metrics::MetricBundle;
use serde::{Deserialize, Serialize};

use crate::config::{is_lower_better, is_per_capita, ScoreWeights};
use crate::normalize::normalize;
use crate::trace::{MetricContribution, ScoreTrace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    /// 0–100, one decimal.
    pub score: f64,
    pub trace: ScoreTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub rank: usize,
    pub name: String,
    pub score: f64,
    pub trace: ScoreTrace,
}

fn per_capita(value: f64, size: Option<f64>) -> f64 {
    match size {
        Some(size) if size > 0.0 => value / size,
        _ => value,
    }
}

/// Score `entity` against `population`.
///
/// Each weighted metric is min-max normalized over the population's
/// measured values, inverted when lower is better, multiplied by its
/// weight and summed. With a positive `team_size`, volume metrics are
/// compared per capita: the entity's value is divided by `team_size` and
/// each population member's by its own `team_size` field (members with a
/// missing or zero size are left as is).
///
/// A metric unmeasured for the entity, or for the whole population,
/// contributes nothing and its weight is not redistributed.
pub fn evaluate(
    entity: &MetricBundle,
    population: &[MetricBundle],
    team_size: Option<f64>,
    weights: Option<&ScoreWeights>,
) -> PerformanceScore {
    let defaults;
    let weights = match weights {
        Some(w) => w,
        None => {
            defaults = ScoreWeights::default();
            &defaults
        }
    };
    let scale = team_size.filter(|s| *s > 0.0);

    let mut trace = ScoreTrace::default();

    for (metric, weight) in weights.iter() {
        let Some(raw) = entity.get(metric) else {
            trace.skipped.push(metric.to_string());
            continue;
        };
        let adjust = scale.is_some() && is_per_capita(metric);

        let value = if adjust { per_capita(raw, scale) } else { raw };
        let values: Vec<f64> = population
            .iter()
            .filter_map(|member| {
                member.get(metric).map(|v| {
                    if adjust {
                        per_capita(v, member.team_size())
                    } else {
                        v
                    }
                })
            })
            .collect();

        if values.is_empty() {
            trace.skipped.push(metric.to_string());
            continue;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let inverted = is_lower_better(metric);
        let scaled = normalize(value, min, max);
        let normalized = if inverted { 100.0 - scaled } else { scaled };
        let weighted_score = normalized * weight;

        trace.applied_weight += weight;
        trace.raw_total += weighted_score;
        trace.contributions.push(MetricContribution {
            metric: metric.to_string(),
            value,
            population_min: min,
            population_max: max,
            normalized,
            inverted,
            weight,
            weighted_score,
        });
    }

    PerformanceScore {
        score: round1(trace.raw_total),
        trace,
    }
}

/// Weighted 0–100 performance score of `entity` within `population`.
pub fn calculate_performance_score(
    entity: &MetricBundle,
    population: &[MetricBundle],
    team_size: Option<f64>,
    weights: Option<&ScoreWeights>,
) -> f64 {
    evaluate(entity, population, team_size, weights).score
}

/// Score every named entity against the whole group and rank them, best
/// first, ties broken by name. With `per_capita`, each entity's own
/// `team_size` field drives the per-capita comparison.
pub fn rank_entities(
    entities: &[(String, MetricBundle)],
    per_capita: bool,
    weights: Option<&ScoreWeights>,
) -> Vec<RankedEntity> {
    let population: Vec<MetricBundle> = entities.iter().map(|(_, b)| b.clone()).collect();

    let mut scored: Vec<(String, PerformanceScore)> = entities
        .iter()
        .map(|(name, bundle)| {
            let size = if per_capita { bundle.team_size() } else { None };
            (name.clone(), evaluate(bundle, &population, size, weights))
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.score
            .total_cmp(&a.1.score)
            .then_with(|| a.0.cmp(&b.0))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(idx, (name, result))| {
            tracing::debug!(entity = %name, score = result.score, "entity scored");
            RankedEntity {
                rank: idx + 1,
                name,
                score: result.score,
                trace: result.trace,
            }
        })
        .collect()
}

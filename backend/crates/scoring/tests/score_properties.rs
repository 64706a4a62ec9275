use pulse_metrics::bundle::{
    CHANGE_FAILURE_RATE, COMMITS, CYCLE_TIME, DEPLOYMENT_FREQUENCY, JIRA_COMPLETED, LEAD_TIME,
    MERGE_RATE, MTTR, PRS, REVIEWS, TEAM_SIZE,
};
use pulse_metrics::MetricBundle;
use pulse_scoring::{calculate_performance_score, evaluate, normalize, rank_entities, ScoreWeights};

fn volume_bundle(prs: f64, reviews: f64, commits: f64, completed: f64, merge_rate: f64) -> MetricBundle {
    MetricBundle::new()
        .with(PRS, Some(prs))
        .with(REVIEWS, Some(reviews))
        .with(COMMITS, Some(commits))
        .with(JIRA_COMPLETED, Some(completed))
        .with(MERGE_RATE, Some(merge_rate))
        .with(DEPLOYMENT_FREQUENCY, Some(completed / 10.0))
}

fn full_bundle(value: f64) -> MetricBundle {
    MetricBundle::new()
        .with(PRS, Some(value))
        .with(REVIEWS, Some(value))
        .with(COMMITS, Some(value))
        .with(CYCLE_TIME, Some(value))
        .with(JIRA_COMPLETED, Some(value))
        .with(MERGE_RATE, Some(value))
        .with(DEPLOYMENT_FREQUENCY, Some(value))
        .with(LEAD_TIME, Some(value))
        .with(CHANGE_FAILURE_RATE, Some(value))
        .with(MTTR, Some(value))
}

#[test]
fn normalize_stays_in_range_for_population_values() {
    let values = [3.0, 7.5, 12.0, 40.0, 41.0];
    let lo = 3.0;
    let hi = 41.0;
    for v in values {
        let n = normalize(v, lo, hi);
        assert!((0.0..=100.0).contains(&n), "{v} normalized to {n}");
    }
    assert_eq!(normalize(17.0, 17.0, 17.0), 50.0);
}

#[test]
fn max_holder_scores_full_weight_and_min_holder_zero() {
    let top = volume_bundle(20.0, 30.0, 80.0, 12.0, 0.9);
    let bottom = volume_bundle(2.0, 1.0, 5.0, 3.0, 0.2);
    let population = vec![top.clone(), bottom.clone()];

    let weights = ScoreWeights::default();
    let applicable: f64 = [PRS, REVIEWS, COMMITS, JIRA_COMPLETED, MERGE_RATE, DEPLOYMENT_FREQUENCY]
        .iter()
        .filter_map(|m| weights.get(m))
        .sum();

    let top_score = calculate_performance_score(&top, &population, None, None);
    let bottom_score = calculate_performance_score(&bottom, &population, None, None);

    assert!((top_score - 100.0 * applicable).abs() < 0.01);
    assert_eq!(bottom_score, 0.0);
}

#[test]
fn equal_population_scores_half_of_total_weight() {
    let population = vec![full_bundle(5.0), full_bundle(5.0), full_bundle(5.0)];
    let weights = ScoreWeights::default();

    let result = evaluate(&population[0], &population, None, Some(&weights));
    assert!((result.score - 50.0 * weights.total()).abs() < 0.01);
    assert!(result
        .trace
        .contributions
        .iter()
        .all(|c| (c.normalized - 50.0).abs() < 0.01));
}

#[test]
fn unmeasured_metric_neither_helps_nor_hurts() {
    let measured = full_bundle(10.0).with(CHANGE_FAILURE_RATE, Some(40.0));
    let unmeasured = full_bundle(10.0).with(CHANGE_FAILURE_RATE, None);
    let population = vec![measured, unmeasured.clone(), full_bundle(10.0).with(CHANGE_FAILURE_RATE, Some(5.0))];

    let result = evaluate(&unmeasured, &population, None, None);
    assert!(result.trace.skipped.iter().any(|m| m == CHANGE_FAILURE_RATE));
    assert!(result
        .trace
        .contributions
        .iter()
        .all(|c| c.metric != CHANGE_FAILURE_RATE));
}

#[test]
fn per_capita_ranking_favours_productive_small_team() {
    let small = volume_bundle(10.0, 10.0, 20.0, 5.0, 0.8).with(TEAM_SIZE, Some(2.0));
    let large = volume_bundle(30.0, 30.0, 60.0, 15.0, 0.8).with(TEAM_SIZE, Some(10.0));
    let entities = vec![("large".to_string(), large), ("small".to_string(), small)];

    let ranked = rank_entities(&entities, true, None);
    assert_eq!(ranked[0].name, "small");
    assert_eq!(ranked[0].rank, 1);

    let raw = rank_entities(&entities, false, None);
    assert_eq!(raw[0].name, "large");
}

#[test]
fn zero_team_size_is_guarded() {
    let a = volume_bundle(10.0, 4.0, 8.0, 2.0, 0.5).with(TEAM_SIZE, Some(0.0));
    let b = volume_bundle(5.0, 2.0, 4.0, 1.0, 0.5).with(TEAM_SIZE, Some(1.0));
    let population = vec![a.clone(), b];

    let score = calculate_performance_score(&a, &population, Some(0.0), None);
    assert!(score.is_finite());
    assert!((0.0..=100.0).contains(&score));
}

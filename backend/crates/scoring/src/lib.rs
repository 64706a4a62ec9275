pub mod config;
pub mod engine;
pub mod normalize;
pub mod trace;

pub use config::ScoreWeights;
pub use engine::{calculate_performance_score, evaluate, rank_entities, PerformanceScore, RankedEntity};
pub use normalize::normalize;
pub use trace::{MetricContribution, ScoreTrace};

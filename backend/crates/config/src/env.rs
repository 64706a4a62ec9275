use std::collections::BTreeMap;
use std::env;

use chrono::{DateTime, NaiveDate, Utc};
use pulse_common::error::{PulseError, PulseResult};
use serde::Deserialize;

const DEFAULT_TRAILING_DAYS: i64 = 90;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub dataset_path: String,
    pub teams_path: Option<String>,
    pub output_path: Option<String>,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub trailing_days: i64,
    pub as_of: Option<DateTime<Utc>>,
    /// Raw weights; validated by the scorer before use.
    pub score_weights: Option<BTreeMap<String, f64>>,
    /// Tracing filter handed to `init_tracing`.
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> PulseResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let window_start = get_opt("WINDOW_START").map(|v| parse_date("WINDOW_START", &v)).transpose()?;
        let window_end = get_opt("WINDOW_END").map(|v| parse_date("WINDOW_END", &v)).transpose()?;
        match (window_start, window_end) {
            (Some(start), Some(end)) if start > end => {
                return Err(PulseError::Config(format!(
                    "WINDOW_START {start} is after WINDOW_END {end}"
                )));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(PulseError::Config(
                    "WINDOW_START and WINDOW_END must be set together".to_string(),
                ));
            }
            _ => {}
        }

        let trailing_days: i64 = get_var_or("TRAILING_DAYS", &DEFAULT_TRAILING_DAYS.to_string())
            .parse()
            .map_err(|e| PulseError::Config(format!("invalid TRAILING_DAYS: {e}")))?;
        if trailing_days <= 0 {
            return Err(PulseError::Config(format!(
                "TRAILING_DAYS must be positive, got {trailing_days}"
            )));
        }

        let as_of = get_opt("AS_OF")
            .map(|v| {
                DateTime::parse_from_rfc3339(&v)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| PulseError::Config(format!("invalid AS_OF: {e}")))
            })
            .transpose()?;

        let score_weights = get_opt("SCORE_WEIGHTS")
            .map(|v| {
                serde_json::from_str::<BTreeMap<String, f64>>(&v)
                    .map_err(|e| PulseError::Config(format!("invalid SCORE_WEIGHTS: {e}")))
            })
            .transpose()?;

        Ok(Self {
            dataset_path: get_var("DATASET_PATH")?,
            teams_path: get_opt("TEAMS_PATH"),
            output_path: get_opt("OUTPUT_PATH"),
            window_start,
            window_end,
            trailing_days,
            as_of,
            score_weights,
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }

    /// Explicit DORA window as instants (start of `window_start` through the
    /// end of `window_end`).
    pub fn window_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.window_start?.and_hms_opt(0, 0, 0)?.and_utc();
        let end = self.window_end?.and_hms_opt(23, 59, 59)?.and_utc();
        Some((start, end))
    }
}

fn parse_date(key: &str, value: &str) -> PulseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| PulseError::Config(format!("invalid {key} (expected YYYY-MM-DD): {e}")))
}

fn get_var(key: &str) -> PulseResult<String> {
    env::var(key).map_err(|_| PulseError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn get_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Window length used when neither explicit dates nor data are available.
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// Inclusive measurement window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `days` days ending at `end`.
    pub fn trailing(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Smallest window covering every instant, `None` if there are none.
    pub fn spanning<I>(instants: I) -> Option<Self>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        instants.into_iter().fold(None, |acc: Option<Self>, at| match acc {
            None => Some(Self::new(at, at)),
            Some(w) => Some(Self::new(w.start.min(at), w.end.max(at))),
        })
    }

    /// Resolve the window to measure over: explicit dates win, then the span
    /// of the data, then the default trailing window ending at `as_of`.
    pub fn resolve<I>(explicit: Option<Self>, instants: I, as_of: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        explicit
            .or_else(|| Self::spanning(instants))
            .unwrap_or_else(|| Self::trailing(as_of, DEFAULT_WINDOW_DAYS))
    }

    /// Whole days covered, never less than one.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

use std::collections::BTreeMap;

use pulse_records::IncidentRecord;
use serde::{Deserialize, Serialize};

use super::classify::{classify_mttr, DoraLevel};
use crate::stats::{iso_week_label, median};

pub const NOTE_NO_INCIDENT_DATA: &str = "incident data not supplied; time to restore requires incident records";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeToRestore {
    /// Median over resolved incidents; `None` when none are resolved.
    pub median_hours: Option<f64>,
    pub resolved_incidents: usize,
    pub open_incidents: usize,
    pub level: Option<DoraLevel>,
    /// ISO week of incident creation → median resolution hours.
    pub trend: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub fn analyze_mttr(incidents: Option<&[IncidentRecord]>) -> TimeToRestore {
    let Some(incidents) = incidents else {
        return TimeToRestore {
            median_hours: None,
            resolved_incidents: 0,
            open_incidents: 0,
            level: None,
            trend: BTreeMap::new(),
            note: Some(NOTE_NO_INCIDENT_DATA.to_string()),
        };
    };

    let mut hours: Vec<f64> = Vec::new();
    let mut by_week: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for incident in incidents {
        if let Some(h) = incident.resolution_hours().filter(|h| h.is_finite()) {
            hours.push(h);
            by_week
                .entry(iso_week_label(incident.created))
                .or_default()
                .push(h);
        }
    }

    let median_hours = median(&hours);
    let trend = by_week
        .into_iter()
        .filter_map(|(week, values)| median(&values).map(|m| (week, m)))
        .collect();

    TimeToRestore {
        median_hours,
        resolved_incidents: hours.len(),
        open_incidents: incidents.len() - hours.len(),
        level: median_hours.map(classify_mttr),
        trend,
        note: None,
    }
}

//! Aggregation engine: summary statistics and chart-ready groupings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pvdb_core::{Incident, Severity};
use serde::Serialize;

/// Characters kept of a party label before the `...` suffix.
const PARTY_LABEL_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_incidents: u64,
    pub total_killed: u64,
    pub total_injured: u64,
    pub high_severity_count: u64,
    pub medium_severity_count: u64,
    pub low_severity_count: u64,
    pub avg_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyDatum {
    pub name: String,
    pub incidents: u64,
    pub killed: u64,
    pub injured: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineDatum {
    pub date: NaiveDate,
    pub incidents: u64,
    pub killed: u64,
    pub injured: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityDatum {
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivisionDatum {
    pub name: String,
    pub incidents: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub party_data: Vec<PartyDatum>,
    pub timeline_data: Vec<TimelineDatum>,
    pub severity_data: Vec<SeverityDatum>,
    pub division_data: Vec<DivisionDatum>,
}

/// Summary statistics over a (possibly pre-filtered) collection.
///
/// An empty collection yields an average confidence of exactly 0, never a
/// division-by-zero fault.
#[must_use]
pub fn statistics(incidents: &[Incident]) -> Statistics {
    let severity_count = |severity: Severity| -> u64 {
        incidents.iter().filter(|i| i.severity == severity).count() as u64
    };

    let avg_confidence = if incidents.is_empty() {
        0.0
    } else {
        let sum: f64 = incidents.iter().map(|i| i.ai_analysis.confidence).sum();
        sum / incidents.len() as f64
    };

    Statistics {
        total_incidents: incidents.len() as u64,
        total_killed: incidents.iter().map(|i| u64::from(i.killed)).sum(),
        total_injured: incidents.iter().map(|i| u64::from(i.injured)).sum(),
        high_severity_count: severity_count(Severity::High),
        medium_severity_count: severity_count(Severity::Medium),
        low_severity_count: severity_count(Severity::Low),
        avg_confidence,
    }
}

/// Chart groupings over a collection (the full catalog in practice).
#[must_use]
pub fn chart_data(incidents: &[Incident]) -> ChartData {
    ChartData {
        party_data: party_data(incidents),
        timeline_data: timeline_data(incidents),
        severity_data: severity_data(incidents),
        division_data: division_data(incidents),
    }
}

/// Per-party incident and casualty sums, ordered by incident count
/// descending. Labels are truncated for display.
fn party_data(incidents: &[Incident]) -> Vec<PartyDatum> {
    // first-seen order, so equal counts stay in record order after the
    // stable sort below
    let mut groups: Vec<(String, PartyDatum)> = Vec::new();
    for incident in incidents {
        let idx = groups
            .iter()
            .position(|(party, _)| *party == incident.party)
            .unwrap_or_else(|| {
                groups.push((
                    incident.party.clone(),
                    PartyDatum {
                        name: truncate_party_label(&incident.party),
                        incidents: 0,
                        killed: 0,
                        injured: 0,
                    },
                ));
                groups.len() - 1
            });
        let datum = &mut groups[idx].1;
        datum.incidents += 1;
        datum.killed += u64::from(incident.killed);
        datum.injured += u64::from(incident.injured);
    }

    let mut data: Vec<PartyDatum> = groups.into_iter().map(|(_, datum)| datum).collect();
    data.sort_by(|a, b| b.incidents.cmp(&a.incidents));
    data
}

/// Per-date incident and casualty sums, ascending by date.
fn timeline_data(incidents: &[Incident]) -> Vec<TimelineDatum> {
    let mut by_date: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
    for incident in incidents {
        let entry = by_date.entry(incident.date).or_default();
        entry.0 += 1;
        entry.1 += u64::from(incident.killed);
        entry.2 += u64::from(incident.injured);
    }
    by_date
        .into_iter()
        .map(|(date, (count, killed, injured))| TimelineDatum {
            date,
            incidents: count,
            killed,
            injured,
        })
        .collect()
}

/// Fixed three-bucket severity counts, high first, with display colors.
fn severity_data(incidents: &[Incident]) -> Vec<SeverityDatum> {
    Severity::BUCKETS
        .iter()
        .map(|&severity| SeverityDatum {
            name: severity.chart_label(),
            value: incidents.iter().filter(|i| i.severity == severity).count() as u64,
            color: severity.chart_color(),
        })
        .collect()
}

/// Per-division incident counts, descending.
fn division_data(incidents: &[Incident]) -> Vec<DivisionDatum> {
    let mut groups: Vec<DivisionDatum> = Vec::new();
    for incident in incidents {
        match groups.iter_mut().find(|d| d.name == incident.division) {
            Some(datum) => datum.incidents += 1,
            None => groups.push(DivisionDatum {
                name: incident.division.clone(),
                incidents: 1,
            }),
        }
    }
    groups.sort_by(|a, b| b.incidents.cmp(&a.incidents));
    groups
}

fn truncate_party_label(party: &str) -> String {
    let mut chars = party.chars();
    let prefix: String = chars.by_ref().take(PARTY_LABEL_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{prefix}...")
    } else {
        prefix
    }
}

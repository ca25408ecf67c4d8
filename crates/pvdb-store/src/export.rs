//! CSV rendering for incident exports.

use pvdb_core::Incident;

/// Export column order, shared by the HTTP endpoint and the CLI.
pub const CSV_HEADERS: [&str; 12] = [
    "ID",
    "Date",
    "Division",
    "District",
    "Location",
    "Party",
    "Killed",
    "Injured",
    "Severity",
    "Description",
    "News Source",
    "AI Confidence",
];

/// Renders incidents as CSV in the fixed column order.
///
/// The description is always quoted with internal quotes doubled; any other
/// field containing a comma, quote, or newline is quoted the same way. The
/// confidence column is a rounded percentage.
#[must_use]
pub fn incidents_to_csv(incidents: &[Incident]) -> String {
    let mut out = CSV_HEADERS.join(",");
    for incident in incidents {
        let confidence_pct = (incident.ai_analysis.confidence * 100.0).round();
        let row = [
            incident.id.to_string(),
            incident.date.to_string(),
            escape(&incident.division),
            escape(&incident.district),
            escape(&incident.location),
            escape(&incident.party),
            incident.killed.to_string(),
            incident.injured.to_string(),
            incident.severity.to_string(),
            quote(&incident.description),
            escape(&incident.news_source),
            format!("{confidence_pct:.0}"),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out
}

/// Wraps a field in quotes, doubling any internal quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Quotes a field only when it needs it.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        quote(field)
    } else {
        field.to_string()
    }
}

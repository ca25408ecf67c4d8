//! Incident record types shared across the workspace.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Three-level ordinal classification of an incident's impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Bucket order used by the severity chart: high first.
    pub const BUCKETS: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Fixed ordering rank: high=3 > medium=2 > low=1.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    /// Bengali display label used by the severity chart.
    #[must_use]
    pub fn chart_label(self) -> &'static str {
        match self {
            Severity::High => "উচ্চ",
            Severity::Medium => "মধ্যম",
            Severity::Low => "নিম্ন",
        }
    }

    /// Display color used by the severity chart.
    #[must_use]
    pub fn chart_color(self) -> &'static str {
        match self {
            Severity::High => "#dc2626",
            Severity::Medium => "#f97316",
            Severity::Low => "#16a34a",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(CoreError::InvalidSeverity(other.to_string())),
        }
    }
}

/// Geocoordinate pair attached to each incident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Casualty counts extracted by the AI pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    pub killed: u32,
    pub injured: u32,
}

/// Sub-confidences and classification nested inside [`AiAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    pub casualties: Casualties,
    pub location_confidence: f64,
    pub party_confidence: f64,
    pub violence_type: String,
}

/// Structured AI annotation attached at ingestion time.
///
/// Treated as opaque input data — nothing in this workspace computes it.
/// Confidence values lie in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub confidence: f64,
    pub key_entities: Vec<String>,
    pub sentiment: String,
    pub processed_at: DateTime<Utc>,
    pub extracted_info: ExtractedInfo,
}

/// A recorded incident report. Immutable once created except through an
/// explicit [`IncidentPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    pub date: NaiveDate,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub police_station: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub party: String,
    pub killed: u32,
    pub injured: u32,
    pub description: String,
    pub severity: Severity,
    pub images: Vec<String>,
    pub news_source: String,
    pub source_url: Option<String>,
    pub ai_analysis: AiAnalysis,
    pub crawled_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub witnesses: Vec<String>,
    pub police_response: Option<String>,
    pub tags: Vec<String>,
}

impl Incident {
    /// Combined casualty count, the `casualties` sort key.
    #[must_use]
    pub fn casualties(&self) -> u32 {
        self.killed + self.injured
    }

    /// Merges a partial patch into this record, field by field.
    ///
    /// Omitted fields — array fields included — keep their existing value;
    /// supplied fields replace it. The caller is responsible for touching
    /// `last_updated`.
    pub fn apply_patch(&mut self, patch: IncidentPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(division) = patch.division {
            self.division = division;
        }
        if let Some(district) = patch.district {
            self.district = district;
        }
        if let Some(upazila) = patch.upazila {
            self.upazila = upazila;
        }
        if let Some(police_station) = patch.police_station {
            self.police_station = police_station;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(coordinates) = patch.coordinates {
            self.coordinates = coordinates;
        }
        if let Some(party) = patch.party {
            self.party = party;
        }
        if let Some(killed) = patch.killed {
            self.killed = killed;
        }
        if let Some(injured) = patch.injured {
            self.injured = injured;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(news_source) = patch.news_source {
            self.news_source = news_source;
        }
        if let Some(source_url) = patch.source_url {
            self.source_url = Some(source_url);
        }
        if let Some(ai_analysis) = patch.ai_analysis {
            self.ai_analysis = ai_analysis;
        }
        if let Some(witnesses) = patch.witnesses {
            self.witnesses = witnesses;
        }
        if let Some(police_response) = patch.police_response {
            self.police_response = Some(police_response);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }
}

/// Insertion input for an incident. The store assigns `id`, `crawled_at`
/// and `last_updated`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncident {
    pub date: NaiveDate,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub police_station: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub party: String,
    #[serde(default)]
    pub killed: u32,
    #[serde(default)]
    pub injured: u32,
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub images: Vec<String>,
    pub news_source: String,
    #[serde(default)]
    pub source_url: Option<String>,
    pub ai_analysis: AiAnalysis,
    #[serde(default)]
    pub witnesses: Vec<String>,
    #[serde(default)]
    pub police_response: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for an incident. Every field is optional; see
/// [`Incident::apply_patch`] for the merge rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IncidentPatch {
    pub date: Option<NaiveDate>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub police_station: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub party: Option<String>,
    pub killed: Option<u32>,
    pub injured: Option<u32>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub images: Option<Vec<String>>,
    pub news_source: Option<String>,
    pub source_url: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub witnesses: Option<Vec<String>>,
    pub police_response: Option<String>,
    pub tags: Option<Vec<String>>,
}

//! Filter specification for incident queries.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{CoreError, Severity};

pub const DEFAULT_PAGE_LIMIT: u64 = 10;
pub const MAX_PAGE_LIMIT: u64 = 200;

/// Sort keys accepted by the query engine. Every key sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Date,
    Severity,
    Casualties,
}

impl std::str::FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "severity" => Ok(SortKey::Severity),
            "casualties" => Ok(SortKey::Casualties),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Optional predicates narrowing an incident query. Absence of a field
/// means no constraint; all supplied predicates combine with logical AND.
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    /// Case-insensitive substring matched against location, description,
    /// party, and tags — any one match qualifies the record.
    pub search: Option<String>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub party: Option<String>,
    /// Set membership; an empty set means no constraint.
    pub severity: Option<Vec<Severity>>,
    /// Inclusive lower bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub date_to: Option<NaiveDate>,
    /// Keep records with killed > 0.
    pub fatal_only: Option<bool>,
    /// Keep records with injured > 0.
    pub injured_only: Option<bool>,
    pub sort_by: Option<SortKey>,
    /// 1-indexed page number.
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl IncidentFilter {
    /// Effective sort key, defaulting to date.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_by.unwrap_or_default()
    }

    /// Effective page number: 1-indexed, never below 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, defaulted and clamped to 1..=200.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }
}

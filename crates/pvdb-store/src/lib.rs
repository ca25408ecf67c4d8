//! In-memory incident record store.
//!
//! Records live in ordered maps keyed by their auto-assigned identifier.
//! A single `RwLock` guards the whole store: every mutation takes the write
//! lock, and identifier generation happens under that same lock, so writers
//! are serialized and ids never collide.

pub mod export;
pub mod query;
pub mod seed;
pub mod stats;

use std::collections::BTreeMap;

use chrono::Utc;
use pvdb_core::{
    Incident, IncidentFilter, IncidentPatch, NewIncident, NewNewsSource, NewsSource,
};
use thiserror::Error;
use tokio::sync::RwLock;

pub use query::IncidentPage;
pub use stats::{ChartData, Statistics};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
}

#[derive(Debug)]
struct StoreInner {
    incidents: BTreeMap<i64, Incident>,
    news_sources: BTreeMap<i64, NewsSource>,
    next_incident_id: i64,
    next_news_source_id: i64,
}

/// The shared record store. Cheap to share via `Arc`; all methods take
/// `&self`.
#[derive(Debug)]
pub struct Store {
    inner: RwLock<StoreInner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                incidents: BTreeMap::new(),
                news_sources: BTreeMap::new(),
                next_incident_id: 1,
                next_news_source_id: 1,
            }),
        }
    }

    /// A store pre-loaded with the built-in seed catalog.
    #[must_use]
    pub fn seeded() -> Self {
        let incidents: BTreeMap<i64, Incident> =
            seed::incidents().into_iter().map(|i| (i.id, i)).collect();
        let news_sources: BTreeMap<i64, NewsSource> = seed::news_sources()
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let next_incident_id = incidents.keys().last().copied().unwrap_or(0) + 1;
        let next_news_source_id = news_sources.keys().last().copied().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(StoreInner {
                incidents,
                news_sources,
                next_incident_id,
                next_news_source_id,
            }),
        }
    }

    /// Filtered, sorted, paginated incidents plus the pre-pagination total.
    pub async fn list_incidents(&self, filter: &IncidentFilter) -> IncidentPage {
        let inner = self.inner.read().await;
        let incidents: Vec<Incident> = inner.incidents.values().cloned().collect();
        query::run(incidents, filter)
    }

    /// A single incident by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn get_incident(&self, id: i64) -> Result<Incident, StoreError> {
        let inner = self.inner.read().await;
        inner.incidents.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    /// Inserts a new incident, assigning its id and timestamps.
    pub async fn create_incident(&self, input: NewIncident) -> Incident {
        let mut inner = self.inner.write().await;
        let id = inner.next_incident_id;
        inner.next_incident_id += 1;
        let now = Utc::now();
        let incident = Incident {
            id,
            date: input.date,
            division: input.division,
            district: input.district,
            upazila: input.upazila,
            police_station: input.police_station,
            location: input.location,
            coordinates: input.coordinates,
            party: input.party,
            killed: input.killed,
            injured: input.injured,
            description: input.description,
            severity: input.severity,
            images: input.images,
            news_source: input.news_source,
            source_url: input.source_url,
            ai_analysis: input.ai_analysis,
            crawled_at: now,
            last_updated: now,
            witnesses: input.witnesses,
            police_response: input.police_response,
            tags: input.tags,
        };
        inner.incidents.insert(id, incident.clone());
        incident
    }

    /// Merges a partial patch into an existing incident and touches
    /// `last_updated`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update_incident(
        &self,
        id: i64,
        patch: IncidentPatch,
    ) -> Result<Incident, StoreError> {
        let mut inner = self.inner.write().await;
        let incident = inner.incidents.get_mut(&id).ok_or(StoreError::NotFound)?;
        incident.apply_patch(patch);
        incident.last_updated = Utc::now();
        Ok(incident.clone())
    }

    /// Removes an incident.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn delete_incident(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .incidents
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    /// All news sources in id order.
    pub async fn list_news_sources(&self) -> Vec<NewsSource> {
        let inner = self.inner.read().await;
        inner.news_sources.values().cloned().collect()
    }

    /// A single news source by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn get_news_source(&self, id: i64) -> Result<NewsSource, StoreError> {
        let inner = self.inner.read().await;
        inner
            .news_sources
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Inserts a new news source, assigning its id.
    pub async fn create_news_source(&self, input: NewNewsSource) -> NewsSource {
        let mut inner = self.inner.write().await;
        let id = inner.next_news_source_id;
        inner.next_news_source_id += 1;
        let source = NewsSource {
            id,
            name: input.name,
            url: input.url,
            status: input.status,
            kind: input.kind,
            last_crawled: input.last_crawled,
            daily_articles: input.daily_articles,
            reliability: input.reliability,
        };
        inner.news_sources.insert(id, source.clone());
        source
    }

    /// Summary statistics over the filtered (but never paginated) set.
    pub async fn statistics(&self, filter: &IncidentFilter) -> Statistics {
        let inner = self.inner.read().await;
        let matching: Vec<Incident> = inner
            .incidents
            .values()
            .filter(|incident| query::matches(incident, filter))
            .cloned()
            .collect();
        stats::statistics(&matching)
    }

    /// Chart groupings over the entire catalog, ignoring any filter.
    pub async fn chart_data(&self) -> ChartData {
        let inner = self.inner.read().await;
        let incidents: Vec<Incident> = inner.incidents.values().cloned().collect();
        stats::chart_data(&incidents)
    }
}

//! Incident endpoints: filtered listing plus create/update/delete.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use pvdb_core::{
    CoreError, Incident, IncidentFilter, IncidentPatch, NewIncident, Severity, SortKey,
};
use pvdb_store::IncidentPage;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, AppState};

/// Raw query-string form of the filter specification. `severity` arrives as
/// a comma-separated list; everything else deserializes directly.
#[derive(Debug, Default, Deserialize)]
pub(super) struct IncidentsQuery {
    pub search: Option<String>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub party: Option<String>,
    pub severity: Option<String>,
    pub date_from: Option<chrono::NaiveDate>,
    pub date_to: Option<chrono::NaiveDate>,
    pub fatal_only: Option<bool>,
    pub injured_only: Option<bool>,
    pub sort_by: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl IncidentsQuery {
    /// Validates the raw parameters into a filter specification.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` when a severity name or sort key is unknown.
    pub(super) fn into_filter(self) -> Result<IncidentFilter, CoreError> {
        let severity = self
            .severity
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::parse::<Severity>)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let sort_by = self.sort_by.map(|s| s.parse::<SortKey>()).transpose()?;

        Ok(IncidentFilter {
            search: self.search,
            division: self.division,
            district: self.district,
            party: self.party,
            severity,
            date_from: self.date_from,
            date_to: self.date_to,
            fatal_only: self.fatal_only,
            injured_only: self.injured_only,
            sort_by,
            page: self.page,
            limit: self.limit,
        })
    }
}

/// Resolves the raw query extractor into a filter, mapping failures to a
/// 400 validation error.
pub(super) fn resolve_filter(
    request_id: &str,
    query: Result<Query<IncidentsQuery>, QueryRejection>,
) -> Result<IncidentFilter, ApiError> {
    let Query(query) = query.map_err(|e| {
        ApiError::new(request_id.to_string(), "validation_error", e.body_text())
    })?;
    query.into_filter().map_err(|e| {
        ApiError::new(request_id.to_string(), "validation_error", e.to_string())
    })
}

fn resolve_id(
    request_id: &str,
    id: Result<Path<i64>, PathRejection>,
) -> Result<i64, ApiError> {
    id.map(|Path(id)| id).map_err(|_| {
        ApiError::new(
            request_id.to_string(),
            "validation_error",
            "invalid incident id",
        )
    })
}

pub(super) async fn list_incidents(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<IncidentsQuery>, QueryRejection>,
) -> Result<Json<IncidentPage>, ApiError> {
    let filter = resolve_filter(&req_id.0, query)?;
    Ok(Json(state.store.list_incidents(&filter).await))
}

pub(super) async fn get_incident(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Incident>, ApiError> {
    let id = resolve_id(&req_id.0, id)?;
    let incident = state
        .store
        .get_incident(id)
        .await
        .map_err(|e| map_store_error(req_id.0, &e, "incident not found"))?;
    Ok(Json(incident))
}

pub(super) async fn create_incident(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<NewIncident>, JsonRejection>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
    let Json(input) =
        body.map_err(|e| ApiError::new(req_id.0, "validation_error", e.body_text()))?;
    let incident = state.store.create_incident(input).await;
    tracing::info!(id = incident.id, "incident created");
    Ok((StatusCode::CREATED, Json(incident)))
}

pub(super) async fn update_incident(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<IncidentPatch>, JsonRejection>,
) -> Result<Json<Incident>, ApiError> {
    let id = resolve_id(&req_id.0, id)?;
    let Json(patch) =
        body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let incident = state
        .store
        .update_incident(id, patch)
        .await
        .map_err(|e| map_store_error(req_id.0, &e, "incident not found"))?;
    Ok(Json(incident))
}

pub(super) async fn delete_incident(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = resolve_id(&req_id.0, id)?;
    state
        .store
        .delete_incident(id)
        .await
        .map_err(|e| map_store_error(req_id.0, &e, "incident not found"))?;
    Ok(StatusCode::NO_CONTENT)
}

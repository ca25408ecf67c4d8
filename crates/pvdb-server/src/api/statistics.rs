//! Summary statistics over the filtered incident set.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};

use pvdb_store::Statistics;

use crate::middleware::RequestId;

use super::{incidents::IncidentsQuery, ApiError, AppState};

/// Statistics honor the filter predicates but never pagination: the counts
/// describe the whole filtered set, not one page of it.
pub(super) async fn get_statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<IncidentsQuery>, QueryRejection>,
) -> Result<Json<Statistics>, ApiError> {
    let filter = super::incidents::resolve_filter(&req_id.0, query)?;
    Ok(Json(state.store.statistics(&filter).await))
}

//! CSV export of the filtered incident set.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::middleware::RequestId;

use super::{incidents::IncidentsQuery, ApiError, AppState};

/// Streams the filtered incidents as a CSV attachment.
///
/// The complete filter specification applies, pagination included, so the
/// export matches what a listing call with the same parameters returns.
pub(super) async fn export_incidents(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<IncidentsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let filter = super::incidents::resolve_filter(&req_id.0, query)?;
    let page = state.store.list_incidents(&filter).await;
    let csv = pvdb_store::export::incidents_to_csv(&page.incidents);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"incidents.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

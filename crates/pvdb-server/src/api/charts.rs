//! Chart-ready groupings over the entire catalog.
//!
//! Unlike `/statistics`, this endpoint ignores filters by design — the
//! dashboard charts always show the full picture.

use axum::{extract::State, Json};

use pvdb_store::ChartData;

use super::AppState;

pub(super) async fn get_charts(State(state): State<AppState>) -> Json<ChartData> {
    Json(state.store.chart_data().await)
}

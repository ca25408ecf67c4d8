//! Crawled news-source endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};

use pvdb_core::{NewNewsSource, NewsSource};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn list_news_sources(State(state): State<AppState>) -> Json<Vec<NewsSource>> {
    Json(state.store.list_news_sources().await)
}

pub(super) async fn create_news_source(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<NewNewsSource>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsSource>), ApiError> {
    let Json(input) =
        body.map_err(|e| ApiError::new(req_id.0, "validation_error", e.body_text()))?;
    let source = state.store.create_news_source(input).await;
    tracing::info!(id = source.id, name = %source.name, "news source created");
    Ok((StatusCode::CREATED, Json(source)))
}

mod charts;
mod export;
mod incidents;
mod news_sources;
mod statistics;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use pvdb_store::{Store, StoreError};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            request_id: request_id.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_store_error(
    request_id: String,
    error: &StoreError,
    message: &str,
) -> ApiError {
    match error {
        StoreError::NotFound => ApiError::new(request_id, "not_found", message),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/incidents",
            get(incidents::list_incidents).post(incidents::create_incident),
        )
        .route(
            "/api/v1/incidents/{id}",
            get(incidents::get_incident)
                .patch(incidents::update_incident)
                .delete(incidents::delete_incident),
        )
        .route("/api/v1/statistics", get(statistics::get_statistics))
        .route("/api/v1/charts", get(charts::get_charts))
        .route(
            "/api/v1/news-sources",
            get(news_sources::list_news_sources).post(news_sources::create_news_source),
        )
        .route("/api/v1/export", get(export::export_incidents))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_app(
            AppState {
                store: Arc::new(Store::seeded()),
            },
            default_rate_limit_state(),
        )
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).expect("json parse")
        };
        (status, json)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        send(
            app,
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, json) = get_json(test_app(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"].as_str(), Some("ok"));
    }

    #[tokio::test]
    async fn list_incidents_returns_catalog_with_total() {
        let (status, json) = get_json(test_app(), "/api/v1/incidents").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"].as_u64(), Some(5));
        let incidents = json["incidents"].as_array().expect("incidents array");
        assert_eq!(incidents.len(), 5);
        // default sort: date descending
        assert_eq!(incidents[0]["date"].as_str(), Some("2025-01-15"));
        assert_eq!(incidents[4]["date"].as_str(), Some("2025-01-11"));
    }

    #[tokio::test]
    async fn list_incidents_applies_conjunctive_filters() {
        let (status, json) = get_json(
            test_app(),
            "/api/v1/incidents?severity=high&fatal_only=true",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"].as_u64(), Some(3));
        for incident in json["incidents"].as_array().unwrap() {
            assert_eq!(incident["severity"].as_str(), Some("high"));
            assert!(incident["killed"].as_u64().unwrap() > 0);
        }
    }

    #[tokio::test]
    async fn list_incidents_paginates_with_pre_slice_total() {
        let (status, json) = get_json(test_app(), "/api/v1/incidents?page=2&limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"].as_u64(), Some(5));
        let incidents = json["incidents"].as_array().unwrap();
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0]["date"].as_str(), Some("2025-01-13"));
        assert_eq!(incidents[1]["date"].as_str(), Some("2025-01-12"));
    }

    #[tokio::test]
    async fn unknown_severity_is_a_validation_error() {
        let (status, json) = get_json(test_app(), "/api/v1/incidents?severity=critical").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn non_numeric_page_is_a_validation_error() {
        let (status, json) = get_json(test_app(), "/api/v1/incidents?page=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
    }

    #[tokio::test]
    async fn get_incident_by_id_and_not_found() {
        let (status, json) = get_json(test_app(), "/api/v1/incidents/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"].as_i64(), Some(1));
        assert_eq!(json["division"].as_str(), Some("ঢাকা"));

        let (status, json) = get_json(test_app(), "/api/v1/incidents/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"].as_str(), Some("not_found"));

        let (status, _) = get_json(test_app(), "/api/v1/incidents/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_patch_delete_incident_lifecycle() {
        let app = test_app();

        let new_incident = serde_json::json!({
            "date": "2025-02-01",
            "division": "সিলেট",
            "district": "সিলেট",
            "upazila": "সিলেট সদর",
            "police_station": "কোতোয়ালী",
            "location": "সিলেট, জিন্দাবাজার",
            "coordinates": { "lat": 24.8949, "lng": 91.8687 },
            "party": "জাতীয় পার্টি",
            "killed": 1,
            "injured": 4,
            "description": "মিছিলে সংঘর্ষ",
            "severity": "low",
            "news_source": "সমকাল",
            "ai_analysis": {
                "confidence": 0.7,
                "key_entities": ["সিলেট"],
                "sentiment": "negative",
                "processed_at": "2025-02-01T09:00:00Z",
                "extracted_info": {
                    "casualties": { "killed": 1, "injured": 4 },
                    "location_confidence": 0.8,
                    "party_confidence": 0.75,
                    "violence_type": "দলীয় সংঘর্ষ"
                }
            }
        });
        let (status, created) = send(
            app.clone(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/incidents")
                .header("content-type", "application/json")
                .body(Body::from(new_incident.to_string()))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"].as_i64(), Some(6));
        assert_eq!(created["tags"].as_array().map(Vec::len), Some(0));

        let (status, patched) = send(
            app.clone(),
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/incidents/6")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"severity":"medium"}"#))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["severity"].as_str(), Some("medium"));
        assert_eq!(patched["killed"].as_u64(), Some(1));

        let (status, _) = send(
            app.clone(),
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/incidents/6")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            app,
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/incidents/6")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_unknown_incident_is_not_found() {
        let (status, json) = send(
            test_app(),
            Request::builder()
                .method("PATCH")
                .uri("/api/v1/incidents/999")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"].as_str(), Some("not_found"));
    }

    #[tokio::test]
    async fn malformed_create_body_is_a_validation_error() {
        let (status, json) = send(
            test_app(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/incidents")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"severity":"catastrophic"}"#))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
    }

    #[tokio::test]
    async fn statistics_reflect_the_filter_not_the_page() {
        let (status, json) = get_json(test_app(), "/api/v1/statistics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_incidents"].as_u64(), Some(5));
        assert_eq!(json["total_killed"].as_u64(), Some(6));
        assert_eq!(json["total_injured"].as_u64(), Some(51));
        assert_eq!(json["high_severity_count"].as_u64(), Some(3));

        let (status, json) =
            get_json(test_app(), "/api/v1/statistics?severity=high&limit=1&page=9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_incidents"].as_u64(), Some(3));
    }

    #[tokio::test]
    async fn statistics_over_no_matches_has_zero_avg_confidence() {
        let (status, json) =
            get_json(test_app(), "/api/v1/statistics?search=no-such-term").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_incidents"].as_u64(), Some(0));
        assert_eq!(json["avg_confidence"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn charts_cover_the_unfiltered_catalog() {
        let (status, json) = get_json(test_app(), "/api/v1/charts").await;
        assert_eq!(status, StatusCode::OK);
        let party_total: u64 = json["party_data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["incidents"].as_u64().unwrap())
            .sum();
        assert_eq!(party_total, 5);

        let timeline = json["timeline_data"].as_array().unwrap();
        assert_eq!(timeline.first().unwrap()["date"].as_str(), Some("2025-01-11"));
        assert_eq!(timeline.last().unwrap()["date"].as_str(), Some("2025-01-15"));

        let severity = json["severity_data"].as_array().unwrap();
        assert_eq!(severity.len(), 3);
        assert_eq!(severity[0]["value"].as_u64(), Some(3));
        assert_eq!(severity[0]["color"].as_str(), Some("#dc2626"));

        let divisions = json["division_data"].as_array().unwrap();
        assert_eq!(divisions.len(), 5);
    }

    #[tokio::test]
    async fn news_sources_list_and_create() {
        let (status, json) = get_json(test_app(), "/api/v1/news-sources").await;
        assert_eq!(status, StatusCode::OK);
        let sources = json.as_array().expect("array body");
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0]["type"].as_str(), Some("national"));

        let (status, created) = send(
            test_app(),
            Request::builder()
                .method("POST")
                .uri("/api/v1/news-sources")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"মানবজমিন","url":"manabzamin.com","status":"active","type":"national","last_crawled":"2025-01-15T08:30:00Z"}"#,
                ))
                .expect("request"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"].as_i64(), Some(5));
        assert_eq!(created["daily_articles"].as_u64(), Some(0));
    }

    #[tokio::test]
    async fn export_returns_a_csv_attachment() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/csv")
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"incidents.csv\"")
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "ID,Date,Division,District,Location,Party,Killed,Injured,Severity,Description,News Source,AI Confidence"
            )
        );
        assert_eq!(csv.lines().count(), 6);
    }

    #[tokio::test]
    async fn export_honors_filters() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?fatal_only=true")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(body.to_vec()).unwrap();
        // header + the three fatal incidents
        assert_eq!(csv.lines().count(), 4);
    }

    #[tokio::test]
    async fn request_id_header_is_echoed_back() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "test-req-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("test-req-1")
        );
    }

    #[tokio::test]
    async fn requests_over_the_rate_limit_get_429() {
        let app = build_app(
            AppState {
                store: Arc::new(Store::seeded()),
            },
            RateLimitState::new(2, Duration::from_secs(60)),
        );

        for _ in 0..2 {
            let (status, _) = get_json(app.clone(), "/api/v1/incidents").await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, json) = get_json(app, "/api/v1/incidents").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"]["code"].as_str(), Some("rate_limited"));
    }
}

mod workshops;

use std::path::Path;
use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::any, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use splitflap_catalog::CatalogClient;
use splitflap_core::FeedVariant;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub feed_variant: FeedVariant,
    pub collection_id: Arc<str>,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
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
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// Builds the router: the workshops feed under `/api/workshops` (any method,
/// any sub-path) and static files from `static_dir` for everything else.
pub fn build_app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/workshops", any(workshops::list_workshops))
        .route("/api/workshops/{*rest}", any(workshops::list_workshops))
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GRAPHQL_PATH: &str = "/admin/api/2025-07/graphql.json";
    const PRODUCTS_PATH: &str = "/admin/api/2025-07/products.json";

    fn test_state(upstream: &str, feed_variant: FeedVariant) -> AppState {
        let catalog = CatalogClient::with_base_url(
            upstream,
            "shpat_test",
            "2025-07",
            5,
            "splitflap-test/0.1",
        )
        .expect("client");
        AppState {
            catalog: Arc::new(catalog),
            feed_variant,
            collection_id: Arc::from("555"),
        }
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes")
            .to_vec();
        (status, headers, body)
    }

    async fn mount_empty_graphql(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "collection": { "products": {
                    "edges": [],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                } } }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn api_error_always_maps_to_500() {
        for code in ["internal_error", "not_found", "bad_request"] {
            let response = ApiError::new("req-1", code, "boom").into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "code {code}");
        }
    }

    #[tokio::test]
    async fn workshops_with_no_products_returns_empty_data() {
        let server = MockServer::start().await;
        mount_empty_graphql(&server).await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Graphql), static_dir.path());
        let (status, headers, body) = get(app, "/api/workshops").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers
                .get(axum::http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(body, br#"{"data":[]}"#);
    }

    #[tokio::test]
    async fn workshops_is_mounted_on_the_whole_prefix() {
        let server = MockServer::start().await;
        mount_empty_graphql(&server).await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Graphql), static_dir.path());
        let (status, _, body) = get(app, "/api/workshops/anything/below").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"data":[]}"#);
    }

    #[tokio::test]
    async fn workshops_serves_transformed_graphql_entries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "collection": { "products": {
                    "edges": [{ "node": {
                        "id": "gid://shopify/Product/1",
                        "title": "Wheel Throwing 101",
                        "status": "ACTIVE",
                        "variants": { "edges": [{ "node": { "inventoryQuantity": 2 } }] },
                        "metafields": { "edges": [{ "node": {
                            "namespace": "custom",
                            "key": "date_and_time",
                            "value": "[\"2099-05-02T23:00:00Z\"]"
                        } }] }
                    } }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                } } }
            })))
            .mount(&server)
            .await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Graphql), static_dir.path());
        let (status, _, body) = get(app, "/api/workshops").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(
            json,
            json!({ "data": [{
                "id": "gid://shopify/Product/1",
                "class": "Wheel Throwing 101",
                "month": "05",
                "year": "2099",
                "date": "0502",
                "time": "0600pm",
                "fullDateTime": "2099-05-02T18:00:00.000-05:00",
                "status": "A"
            }] })
        );
    }

    #[tokio::test]
    async fn rest_feed_upstream_failure_still_returns_empty_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PRODUCTS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Rest), static_dir.path());
        let (status, _, body) = get(app, "/api/workshops").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"data":[]}"#);
    }

    #[tokio::test]
    async fn graphql_feed_upstream_failure_is_a_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Graphql), static_dir.path());
        let (status, _, body) = get(app, "/api/workshops").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "catalog fetch failed");
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let server = MockServer::start().await;
        mount_empty_graphql(&server).await;
        let static_dir = tempfile::tempdir().expect("tempdir");

        let app = build_app(test_state(&server.uri(), FeedVariant::Graphql), static_dir.path());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/workshops")
                    .header("x-request-id", "display-42")
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
            Some("display-42")
        );
    }

    #[tokio::test]
    async fn static_files_are_served_verbatim() {
        let server = MockServer::start().await;
        let static_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(static_dir.path().join("index.html"), "<h1>flaps</h1>").expect("write");
        std::fs::write(static_dir.path().join("board.js"), "console.log(1);").expect("write");

        let state = test_state(&server.uri(), FeedVariant::Graphql);

        let (status, _, body) = get(build_app(state.clone(), static_dir.path()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>flaps</h1>");

        let (status, _, body) = get(build_app(state.clone(), static_dir.path()), "/board.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"console.log(1);");

        let (status, _, _) = get(build_app(state, static_dir.path()), "/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

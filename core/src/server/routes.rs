//! HTTP routes for the plugin catalog

use crate::catalog::PluginRecord;
use crate::server::page::INDEX_HTML;
use crate::service::{CatalogService, HealthStatus};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the router over a catalog service.
pub fn router(service: CatalogService, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(handle_index))
        .route("/plugin_list", get(handle_plugin_list))
        .route("/plugins/:name", get(handle_plugin_detail))
        .route("/health", get(handle_health))
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        );
    }

    app
}

async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_plugin_list(State(service): State<CatalogService>) -> Response {
    match service.list_plugins().await {
        Ok(plugins) => Json(PluginListResponse {
            success: true,
            count: plugins.len(),
            plugins,
            updated_at: Utc::now().to_rfc3339(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(kind = e.kind(), "Listing plugins failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to list plugins")
        }
    }
}

async fn handle_plugin_detail(
    State(service): State<CatalogService>,
    Path(name): Path<String>,
) -> Response {
    match service.get_plugin(&name).await {
        Ok(Some(plugin)) => Json(PluginDetailResponse {
            success: true,
            plugin,
        })
        .into_response(),
        Ok(None) => {
            tracing::debug!(name = %name, "Plugin not found");
            error_response(StatusCode::NOT_FOUND, "plugin not found")
        }
        Err(e) => {
            tracing::error!(name = %name, kind = e.kind(), "Plugin lookup failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to load plugin details")
        }
    }
}

async fn handle_health(State(service): State<CatalogService>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: service.health_check(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
struct PluginListResponse {
    success: bool,
    count: usize,
    plugins: Vec<PluginRecord>,
    updated_at: String,
}

#[derive(Serialize)]
struct PluginDetailResponse {
    success: bool,
    plugin: PluginRecord,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    detail: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: HealthStatus,
    timestamp: String,
    version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};
    use tower::ServiceExt;

    fn test_router(dir: &TempDir, strict: bool) -> Router {
        let store = Arc::new(CatalogStore::new(dir.path().join("plugins_data.json")));
        router(CatalogService::new(store).with_strict_reads(strict), true)
    }

    fn encode_path(name: &str) -> String {
        name.bytes().map(|b| format!("%{:02X}", b)).collect()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_plugin_list() {
        let dir = tempdir().unwrap();
        let (status, body) = get(test_router(&dir, false), "/plugin_list").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 8);
        assert_eq!(body["plugins"].as_array().unwrap().len(), 8);
        assert!(body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_plugin_detail() {
        let dir = tempdir().unwrap();
        let uri = format!("/plugins/{}", encode_path("音乐点播插件"));
        let (status, body) = get(test_router(&dir, false), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plugin"]["name"], "音乐点播插件");
        assert_eq!(body["plugin"]["author"], "Community");
        assert_eq!(body["plugin"]["version"], "2.1.0");
        assert_eq!(
            body["plugin"]["github_url"],
            "https://github.com/maibot/music-plugin"
        );
    }

    #[tokio::test]
    async fn test_plugin_detail_not_found() {
        let dir = tempdir().unwrap();
        let uri = format!("/plugins/{}", encode_path("不存在"));
        let (status, body) = get(test_router(&dir, false), &uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["detail"], "plugin not found");
    }

    #[tokio::test]
    async fn test_broken_document_soft_and_strict() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("plugins_data.json"), "not json").unwrap();

        let (status, body) = get(test_router(&dir, false), "/plugin_list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);

        let (status, body) = get(test_router(&dir, true), "/plugin_list").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "failed to list plugins");

        let uri = format!("/plugins/{}", encode_path("天气查询插件"));
        let (status, _) = get(test_router(&dir, true), &uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempdir().unwrap();
        let (status, body) = get(test_router(&dir, false), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let dir = tempdir().unwrap();
        let response = test_router(&dir, false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = tempdir().unwrap();
        let response = test_router(&dir, false)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}

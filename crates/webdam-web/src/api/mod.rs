mod browse;

use axum::extract::State;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub fn widget_router() -> Router<AppState> {
    Router::new()
        .route("/browse", post(browse::browse))
        .route("/select", post(browse::select))
        .route("/bundles", get(browse::bundles))
}

/// Full application router with middleware.
pub fn app(state: AppState) -> Router {
    // CORS: same-origin only by default (no cross-origin requests allowed)
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", widget_router())
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        demo: state.config.demo,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use webdam_core::{FolderId, InMemoryWebdam};

    use super::*;
    use crate::config::ServerConfig;

    fn config() -> ServerConfig {
        let mut config = ServerConfig::default();
        config.demo = true;
        config.core.widget.bundle = Some("webdam".to_string());
        config.core.widget.cardinality = 2;
        config.core.bundles.push(crate::demo::bundle());
        config
    }

    fn app_with(client: Arc<InMemoryWebdam>) -> Router {
        app(AppState::new(config(), client))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn labels(view: &Value) -> Vec<String> {
        view["breadcrumbs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["label"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = send(app_with(Arc::new(crate::demo::client())), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["demo"], true);
    }

    #[tokio::test]
    async fn first_browse_shows_home() {
        let (status, view) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/browse",
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(labels(&view), vec!["Home"]);
        assert_eq!(view["folders"].as_array().unwrap().len(), 2);
        assert!(view["assets"].as_array().unwrap().is_empty());
        assert_eq!(view["trail"], json!([{"id": 0, "name": "Home"}]));
    }

    #[tokio::test]
    async fn browse_descends_then_ascends() {
        let client = Arc::new(crate::demo::client());

        let (_, view) = send(
            app_with(client.clone()),
            "POST",
            "/api/browse",
            Some(json!({"trigger": {"type": "folder", "folder_id": 5}})),
        )
        .await;
        let (_, view) = send(
            app_with(client.clone()),
            "POST",
            "/api/browse",
            Some(json!({"trail": view["trail"], "trigger": {"type": "folder", "folder_id": 12}})),
        )
        .await;
        assert_eq!(labels(&view), vec!["Home", "Photos", "2024"]);
        assert_eq!(view["assets"].as_array().unwrap().len(), 3);

        let (status, view) = send(
            app_with(client),
            "POST",
            "/api/browse",
            Some(json!({"trail": view["trail"], "trigger": {"type": "folder", "folder_id": 0}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(labels(&view), vec!["Home"]);
    }

    #[tokio::test]
    async fn browse_missing_folder_is_404() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/browse",
            Some(json!({"trigger": {"type": "folder", "folder_id": 999}})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn browse_remote_failure_is_502() {
        let client = Arc::new(crate::demo::client());
        client.fail_folder(FolderId::new(5));
        let (status, body) = send(
            app_with(client),
            "POST",
            "/api/browse",
            Some(json!({"trigger": {"type": "folder", "folder_id": 5}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn browse_bad_trail_is_400() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/browse",
            Some(json!({"trail": [{"id": 5, "name": "Photos"}], "trigger": {"type": "other"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn select_prepares_entities() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/select",
            Some(json!({
                "trigger": {"type": "main_submit"},
                "assets": [100, 0, 102],
                "uid": 3,
                "langcode": "en"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let entities = body["entities"].as_array().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0]["name"], "beach.jpg");
        assert_eq!(entities[0]["bundle"], "webdam");
        assert_eq!(entities[0]["published"], true);
        assert_eq!(entities[1]["published"], false);
        assert_eq!(entities[0]["fields"]["field_webdam_id"], 100);
    }

    #[tokio::test]
    async fn select_too_many_is_422() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/select",
            Some(json!({
                "trigger": {"type": "main_submit"},
                "assets": [100, 101, 102]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "You can not select more than 2 entities.");

        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/select",
            Some(json!({
                "trigger": {"type": "main_submit"},
                "assets": [100, 101],
                "cardinality": 1
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "You can not select more than 1 entity.");
    }

    #[tokio::test]
    async fn select_with_other_trigger_is_empty() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "POST",
            "/api/select",
            Some(json!({"trigger": {"type": "other"}, "assets": [100, 101, 102]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["entities"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn bundles_lists_eligible() {
        let (status, body) = send(
            app_with(Arc::new(crate::demo::client())),
            "GET",
            "/api/bundles",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"], "webdam");
        assert_eq!(body["bundles"][0]["id"], "webdam");
    }
}

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::RuntimeService;

use super::handlers::{
    containers_handler, dashboard_handler, health_handler, images_handler, restart_handler,
    start_handler, stop_handler, AppState,
};

pub fn create_router(runtime_service: RuntimeService, request_timeout: Duration) -> Router {
    let state = AppState {
        runtime_service,
        request_timeout,
    };

    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/containers", get(containers_handler))
        .route("/containers/{id}/start", post(start_handler))
        .route("/containers/{id}/stop", post(stop_handler))
        .route("/containers/{id}/restart", post(restart_handler))
        .route("/images", get(images_handler));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::adapters::SimulatedAdapter;

    fn app() -> Router {
        let service = RuntimeService::new(Arc::new(SimulatedAdapter::new()));
        create_router(service, Duration::from_secs(5))
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (status, body) = call(app(), "GET", "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "simulated");
    }

    #[tokio::test]
    async fn test_dashboard_and_listings() {
        let app = app();

        let (status, body) = call(app.clone(), "GET", "/api/v1/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["containersTotal"], 3);
        assert_eq!(body["simulated"], true);

        let (status, body) = call(app.clone(), "GET", "/api/v1/containers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[2]["state"], "exited");

        let (status, body) = call(app, "GET", "/api/v1/images").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["repoTags"], "traefik:v3");
    }

    #[tokio::test]
    async fn test_commands_mutate_shared_state() {
        let app = app();

        let (status, body) = call(app.clone(), "POST", "/api/v1/containers/52c0c9150e4f/start").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "started");

        let (_, body) = call(app.clone(), "GET", "/api/v1/dashboard").await;
        assert_eq!(body["containersUp"], 3);
        assert_eq!(body["containersDown"], 0);

        let (status, body) = call(app, "POST", "/api/v1/containers/9df8a4a8ce2a/stop").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "stopped");
    }

    #[tokio::test]
    async fn test_unknown_container_is_404() {
        let (status, body) = call(app(), "POST", "/api/v1/containers/nope/restart").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nope"));
    }
}

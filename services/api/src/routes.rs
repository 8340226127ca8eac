use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use compass::assessment::{assessment_router, AssessmentRouterState, ResponseStore};
use serde_json::json;

pub(crate) fn with_assessment_routes<S>(state: AssessmentRouterState<S>) -> axum::Router
where
    S: ResponseStore + 'static,
{
    assessment_router(state)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryResponseStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use compass::assessment::SubmissionService;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn build_router(store: Arc<InMemoryResponseStore>) -> axum::Router {
        with_assessment_routes(AssessmentRouterState {
            service: Arc::new(SubmissionService::new(store)),
            toggle_key: Some("sesame".to_string()),
        })
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let router = build_router(Arc::new(InMemoryResponseStore::open()));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn assessment_status_is_mounted_alongside_operational_routes() {
        let router = build_router(Arc::new(InMemoryResponseStore::open()));
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/assessment/status")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("isOpen"), Some(&json!(true)));
    }
}

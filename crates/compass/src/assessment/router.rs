use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::gateway::{PortalStatus, ResponseStore, SubmissionError};
use super::scoring::ScoreProfile;
use super::service::SubmissionService;
use super::session::AllResponses;

/// Shared state for the assessment endpoints. The toggle key is optional;
/// when absent the toggle endpoint refuses every request.
pub struct AssessmentRouterState<S> {
    pub service: Arc<SubmissionService<S>>,
    pub toggle_key: Option<String>,
}

impl<S> Clone for AssessmentRouterState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            toggle_key: self.toggle_key.clone(),
        }
    }
}

/// Router builder exposing the gate check, submission intake, and the
/// administrative open/close toggle.
pub fn assessment_router<S>(state: AssessmentRouterState<S>) -> Router
where
    S: ResponseStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessment/status",
            get(status_handler::<S>).post(toggle_handler::<S>),
        )
        .route(
            "/api/v1/assessment/submissions",
            post(submit_handler::<S>),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusQuery {
    key: Option<String>,
}

pub(crate) async fn status_handler<S>(
    State(state): State<AssessmentRouterState<S>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    S: ResponseStore + 'static,
{
    match state.service.portal_status() {
        Ok(status) => {
            let payload = match query.key {
                Some(key) => {
                    let authorized = state
                        .toggle_key
                        .as_deref()
                        .is_some_and(|expected| expected == key);
                    json!({ "isOpen": status.is_open(), "authorized": authorized })
                }
                None => json!({ "isOpen": status.is_open() }),
            };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string(), "isOpen": false });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    pub(crate) responses: AllResponses,
    pub(crate) scores: ScoreProfile,
}

pub(crate) async fn submit_handler<S>(
    State(state): State<AssessmentRouterState<S>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: ResponseStore + 'static,
{
    match state.service.submit(&request.responses, &request.scores) {
        Ok(()) => {
            let payload = json!({
                "success": true,
                "message": "Responses submitted successfully",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Closed) => {
            let payload = json!({ "error": "Assessment is currently closed" });
            (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Validation(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Store(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleRequest {
    pub(crate) key: Option<String>,
    pub(crate) status: String,
}

pub(crate) async fn toggle_handler<S>(
    State(state): State<AssessmentRouterState<S>>,
    axum::Json(request): axum::Json<ToggleRequest>,
) -> Response
where
    S: ResponseStore + 'static,
{
    let authorized = match (&state.toggle_key, &request.key) {
        (Some(expected), Some(provided)) => expected == provided,
        _ => false,
    };
    if !authorized {
        let payload = json!({ "error": "Unauthorized" });
        return (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response();
    }

    let Some(status) = PortalStatus::parse(&request.status) else {
        let payload = json!({ "error": "Invalid status. Must be \"open\" or \"closed\"" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    match state.service.set_portal_status(status) {
        Ok(()) => {
            let payload = json!({
                "success": true,
                "status": status.label(),
                "message": format!("Assessment portal is now {}", status.label()),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

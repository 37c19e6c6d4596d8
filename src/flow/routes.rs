//! REST endpoints over the flow controller.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::FlowError;
use crate::flow::controller::FlowController;
use crate::flow::session::StepPatch;

/// Shared state for flow routes.
#[derive(Clone)]
pub struct FlowRouteState {
    pub controller: Arc<FlowController>,
}

/// GET /api/onboarding/status
///
/// Current step, completion flag, advance gating, and the breadcrumb
/// projection.
async fn get_status(State(state): State<FlowRouteState>) -> impl IntoResponse {
    Json(state.controller.status().await)
}

/// GET /api/onboarding/session
///
/// The full accumulated session data.
async fn get_session(State(state): State<FlowRouteState>) -> impl IntoResponse {
    Json(state.controller.session().await)
}

/// POST /api/onboarding/advance
async fn post_advance(State(state): State<FlowRouteState>) -> impl IntoResponse {
    Json(state.controller.advance().await)
}

/// POST /api/onboarding/retreat
async fn post_retreat(State(state): State<FlowRouteState>) -> impl IntoResponse {
    Json(state.controller.retreat().await)
}

/// PUT /api/onboarding/step
///
/// Merge a patch into the active step. A patch addressed to any other
/// step is a caller bug and returns 409.
async fn put_step(
    State(state): State<FlowRouteState>,
    Json(patch): Json<StepPatch>,
) -> impl IntoResponse {
    match state.controller.update_step_data(patch).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e @ FlowError::StepNotActive { .. }) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// POST /api/onboarding/reset
async fn post_reset(State(state): State<FlowRouteState>) -> impl IntoResponse {
    state.controller.reset().await;
    StatusCode::NO_CONTENT
}

/// Build the flow REST routes.
pub fn flow_routes(state: FlowRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/session", get(get_session))
        .route("/api/onboarding/advance", post(post_advance))
        .route("/api/onboarding/retreat", post(post_retreat))
        .route("/api/onboarding/step", put(put_step))
        .route("/api/onboarding/reset", post(post_reset))
        .with_state(state)
}

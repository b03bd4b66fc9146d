use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use waypoint_core::error::WaypointError;
use waypoint_core::types::{iso_timestamp, Envelope, GraphQlRequest};
use waypoint_graphql::RequestContext;

use crate::state::AppState;

// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "🚀 Waypoint gateway is running!",
        "endpoints": {
            "graphql": "/graphql",
            "playground": "/graphql (GET)",
        },
        "timestamp": iso_timestamp(),
    }))
}

// POST /graphql; malformed bodies get a 500 with an errors envelope
pub async fn graphql(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: GraphQlRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let err = WaypointError::InvalidRequest(e.to_string());
            warn!(error = %err, "Rejecting GraphQL request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Envelope::error(err.to_string())),
            )
                .into_response();
        }
    };

    let credentials = state.credentials();
    let envelope = state
        .dispatcher
        .dispatch(
            &request.query,
            &request.variables,
            RequestContext {
                credentials: &credentials,
            },
        )
        .await;

    Json(envelope).into_response()
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{from_fn, map_response};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Span};

use waypoint_core::config::AppConfig;

use crate::middleware;
use crate::routes;
use crate::state::AppState;
use crate::static_files;

/// HTTP gateway server built on axum.
pub struct GatewayServer {
    state: Arc<AppState>,
}

impl GatewayServer {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the gateway server until the cancellation token is triggered.
    pub async fn run(&self, bind: &str, shutdown: CancellationToken) -> anyhow::Result<()> {
        let app = router(self.state.clone());

        let listener = TcpListener::bind(bind).await?;
        info!(bind = %bind, "Gateway listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Gateway shut down");
        Ok(())
    }
}

/// Build the full router: routes, preflight short-circuit, CORS headers and
/// request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/graphql",
            post(routes::graphql)
                .get(static_files::playground)
                .fallback(routes::not_found),
        )
        .route("/", get(routes::root).fallback(routes::not_found))
        .fallback(routes::not_found)
        .layer(from_fn(middleware::preflight))
        .layer(map_response(middleware::cors_headers))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

//! Server Implementation
//!
//! Router assembly and the HTTP serve loop.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::get,
};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// Multipart bodies may carry the 5 MB image plus field overhead.
const MAX_BODY_SIZE: usize = 6 * 1024 * 1024;

#[derive(Serialize)]
struct ApiInfo {
    message: &'static str,
}

async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Furniture Order Management API",
    })
}

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Refuse `/api/*` requests outright while the store is not connected,
/// instead of letting every handler time out against a dead handle.
async fn require_store(
    State(state): State<ServerState>,
    request: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    if request.uri().path().starts_with("/api") && !state.db_ready() {
        return axum::response::IntoResponse::into_response(AppError::unavailable(
            "Database not connected. Check that WORK_DIR is writable and restart the server.",
        ));
    }
    next.run(request).await
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .route("/", get(root))
        .merge(api::health::router())
        // Collection APIs
        .merge(api::products::router())
        .merge(api::customers::router())
        .merge(api::orders::router())
        .merge(api::invoices::router())
        .merge(api::feedback::router())
        .merge(api::faqs::router())
        .merge(api::contact::router())
        .merge(api::gallery::router())
}

/// Build the complete application: routes, static uploads, middleware.
pub fn app(state: ServerState) -> Router {
    let uploads = ServeDir::new(state.config.uploads_dir());

    build_app()
        .nest_service("/uploads", uploads)
        .layer(middleware::from_fn_with_state(state.clone(), require_store))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        let app = app(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server running on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        Ok(())
    }
}

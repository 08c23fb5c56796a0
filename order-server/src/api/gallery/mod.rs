//! Gallery API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/gallery", gallery_routes())
}

fn gallery_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/upload", post(handler::upload))
        .route("/{id}", get(handler::get_by_id).put(handler::update).delete(handler::delete))
}

//! Feedback API module

mod handler;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/feedback", feedback_routes())
}

fn feedback_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/photos", get(handler::photos))
        .route("/with-image", post(handler::create_with_image))
        .route("/{id}", put(handler::update))
        .route("/{id}/reply", post(handler::reply))
        .route("/{id}/visibility", patch(handler::toggle_visibility))
}

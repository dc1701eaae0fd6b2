//! Store API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Store router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/stores", get(handler::list))
        .route("/api/stores/sync", post(handler::sync))
}

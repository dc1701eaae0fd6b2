//! Chatbot API Module

mod handler;

pub use handler::{ChatbotResponse, respond};

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Chatbot router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/chatbot", get(handler::query))
}

//! HTTP REST API routes

mod command_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use command_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/commands", post(command_routes::execute_command))
        .route("/api/settings", get(command_routes::get_settings))
        .route("/api/chat", get(command_routes::chat_log))
}

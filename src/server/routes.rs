use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::dispatch::ActionDispatcher;

use super::handlers::{get_health_handler, get_status_handler, post_action_handler};

pub fn create_status_routes() -> Router<Arc<ActionDispatcher>> {
    Router::new().route("/api/status", get(get_status_handler))
}

pub fn create_action_routes() -> Router<Arc<ActionDispatcher>> {
    Router::new().route("/api/actions/{name}", post(post_action_handler))
}

pub fn create_health_routes() -> Router<Arc<ActionDispatcher>> {
    Router::new().route("/api/health", get(get_health_handler))
}

pub fn create_routes(dispatcher: Arc<ActionDispatcher>) -> Router {
    Router::new()
        .merge(create_status_routes())
        .merge(create_action_routes())
        .merge(create_health_routes())
        .with_state(dispatcher)
}

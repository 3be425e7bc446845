use axum::{
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;

use crate::AppState;
use super::controller;

pub fn poller_routes() -> Router<Arc<AppState>> {
    // The function gateway may forward sub-paths; every path behaves like `/`.
    Router::new()
        .route("/", function_handler())
        .route("/{*path}", function_handler())
}

fn function_handler() -> MethodRouter<Arc<AppState>> {
    // HEAD would otherwise be answered by the GET handler.
    get(controller::health)
        .head(controller::method_not_allowed)
        .post(controller::poll)
        .fallback(controller::method_not_allowed)
}

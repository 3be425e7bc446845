pub mod config;
pub mod modules;
pub mod services;

use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use config::Config;
use modules::poller::poller_routes;
use services::poller::Poller;

/// Largest POST body accepted; anything bigger is treated as unreadable
pub const MAX_BODY_BYTES: usize = 1024 * 100;

pub struct AppState {
    pub config: Config,
    pub poller: Poller,
}

pub fn create_app(config: Config) -> Router {
    create_app_with_poller(config, Poller::new(reqwest::Client::new()))
}

pub fn create_app_with_poller(config: Config, poller: Poller) -> Router {
    let state = Arc::new(AppState { config, poller });

    poller_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// src/lib.rs

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod data_provider;
pub mod errors;
pub mod filter_state;
pub mod filters;
pub mod grid;
pub mod handlers;
pub mod htmx_handlers;
pub mod mapper;
pub mod models;
pub mod pagination;
pub mod response;
pub mod state;
pub mod swapi;

use crate::handlers::list_planets_handler;
use crate::htmx_handlers::{list_planets_htmx_handler, planets_page_handler};
use crate::state::AppState;

/// Definicja routingu aplikacji.
pub fn build_router(app_state: AppState) -> Router {
    let static_dir = app_state.static_dir.clone();

    Router::new()
        .route("/", get(planets_page_handler))
        .route("/htmx/planets", get(list_planets_htmx_handler))
        .route("/api/planets", get(list_planets_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

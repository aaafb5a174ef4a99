//! Router assembly and shared state.

use std::path::Path;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use userchain_ledger::Ledger;

use crate::routes;

/// Shared handle passed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

/// Build the application router: the JSON API under `/api`, static files at
/// the root, permissive CORS over everything.
pub fn build(ledger: Arc<Ledger>, static_dir: &Path) -> Router {
    let state = AppState { ledger };

    Router::new()
        .nest("/api", api_router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/info", get(routes::info))
        .route("/blocks", get(routes::list_blocks))
        .route("/block/:index", get(routes::get_block))
        .route("/users", get(routes::list_users).post(routes::register_user))
        .route("/user/:username", get(routes::get_user))
        .route("/validate", get(routes::validate))
        .route("/search/:query", get(routes::search))
}

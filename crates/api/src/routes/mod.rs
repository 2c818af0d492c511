//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod database;
pub mod files;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(files::routes())
        .merge(database::routes())
}

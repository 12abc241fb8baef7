//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser dashboard is served from a different origin, so every route
//! sits behind a permissive CORS layer. Account and sync endpoints keep the
//! paths the client already calls; habit endpoints live at the root.

pub mod account;
pub mod habits;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Status plus `{ "message": ... }` body, the shape every endpoint uses.
pub type MessageResponse = (StatusCode, Json<Value>);

pub(crate) fn message(status: StatusCode, message: &str) -> MessageResponse {
    (status, Json(json!({ "message": message })))
}

pub(crate) fn internal_error() -> MessageResponse {
    message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/api/migrate", post(account::migrate))
        .route("/habits", get(habits::list_habits).post(habits::add_habit))
        .route("/habits/{id}", delete(habits::delete_habit))
        .route("/toggle", post(habits::toggle_habit))
        .route("/progress", get(habits::progress))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

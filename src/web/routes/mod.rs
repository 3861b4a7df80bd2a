//! Contains all the routes that this application can handle.

pub mod register;

pub use register::register;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

use crate::AppState;
use register::{register_fallback, register_preflight};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server.
/// `/register` answers POST (registration), OPTIONS (CORS preflight) and
/// rejects every other method with a 405.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/register",
            post(register)
                .options(register_preflight)
                .fallback(register_fallback),
        )
        .route("/health-check", get(health_check))
        .with_state(app_state)
}

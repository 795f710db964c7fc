use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod jwt;
pub mod password;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/me", get(handlers::me))
}

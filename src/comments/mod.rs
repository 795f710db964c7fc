use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/news/:id/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route(
            "/comments/:id",
            put(handlers::update_comment).delete(handlers::delete_comment),
        )
}

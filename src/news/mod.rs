use axum::{routing::get, Router};

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(handlers::list_news).post(handlers::create_news))
        .route(
            "/news/:id",
            get(handlers::get_news)
                .put(handlers::update_news)
                .delete(handlers::delete_news),
        )
}

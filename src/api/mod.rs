use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::search::SearchService;

pub mod handlers;
pub mod models;

pub fn create_router(search: Arc<SearchService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/search",
            get(handlers::search_handler).fallback(handlers::not_found_handler),
        )
        .route(
            "/search/users",
            get(handlers::search_users_handler).fallback(handlers::not_found_handler),
        )
        .route(
            "/search/content",
            get(handlers::search_content_handler).fallback(handlers::not_found_handler),
        )
        .route(
            "/health",
            get(handlers::health_handler).fallback(handlers::not_found_handler),
        )
        .with_state(search)
        .fallback(handlers::not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

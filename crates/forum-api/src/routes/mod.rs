//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{routing::get, routing::post, Router};

use crate::handlers::{categories, comments, health, posts, reactions, users};
use crate::state::AppState;

/// API router, without health probes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(reaction_routes())
        .merge(user_routes())
        .merge(category_routes())
}

fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/stats", get(posts::get_post_stats))
        .route("/posts/:post_id/comments", post(comments::create_comment))
}

fn reaction_routes() -> Router<AppState> {
    Router::new().route(
        "/reactions",
        get(reactions::get_reaction).post(reactions::toggle_reaction),
    )
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/posts", get(users::get_user_posts))
}

fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(categories::list_categories))
}

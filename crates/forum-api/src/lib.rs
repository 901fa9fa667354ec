//! # forum-api
//!
//! REST API server built with Axum. The acting user arrives in the
//! `x-user-id` header; an upstream identity layer is expected to set it.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_memory_state, run};
pub use state::AppState;

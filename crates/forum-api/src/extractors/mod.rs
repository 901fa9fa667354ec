//! Axum extractors for request handling
//!
//! Acting-user identity, typed path IDs, query strings and JSON bodies, each
//! rejecting with an [`ApiError`](crate::response::ApiError).

mod identity;
mod path;
mod query;
mod validated;

pub use identity::{OptionalViewer, Viewer, USER_ID_HEADER};
pub use path::{PostIdPath, UserIdPath};
pub use query::QueryParams;
pub use validated::{JsonBody, ValidatedJson};

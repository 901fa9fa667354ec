//! Acting-user extractors
//!
//! The forum does not authenticate. An upstream identity layer resolves the
//! session and forwards the user as an opaque ID in `x-user-id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use forum_common::AppError;
use forum_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the acting user's ID
pub const USER_ID_HEADER: &str = "x-user-id";

/// The acting user; rejects with 401 when the header is absent or malformed
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    pub user_id: Snowflake,
}

/// The acting user if one was forwarded. Guests get `None`; a malformed
/// header is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct OptionalViewer(pub Option<Viewer>);

impl OptionalViewer {
    pub fn user_id(&self) -> Option<Snowflake> {
        self.0.map(|v| v.user_id)
    }
}

fn viewer_from_parts(parts: &Parts) -> Result<Option<Viewer>, ApiError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let user_id = value
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<Snowflake>().ok())
        .ok_or_else(|| {
            tracing::warn!("Malformed {} header", USER_ID_HEADER);
            AppError::InvalidIdentity(format!("{USER_ID_HEADER} must be a numeric id"))
        })?;

    Ok(Some(Viewer { user_id }))
}

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        viewer_from_parts(parts)?.ok_or_else(|| AppError::MissingIdentity.into())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalViewer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        viewer_from_parts(parts).map(OptionalViewer)
    }
}

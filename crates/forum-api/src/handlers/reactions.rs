//! Reaction handlers
//!
//! Like/dislike toggles on posts and comments.

use axum::{extract::State, Json};
use forum_service::dto::{ReactionQuery, ReactionStateResponse, ToggleReactionRequest};
use forum_service::ReactionService;

use crate::extractors::{JsonBody, QueryParams, Viewer};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Toggle a like or dislike
///
/// POST /reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    viewer: Viewer,
    JsonBody(request): JsonBody<ToggleReactionRequest>,
) -> ApiResult<NoContent> {
    let service = ReactionService::new(state.service_context());
    service
        .toggle_parts(viewer.user_id, request.post_id, request.comment_id, request.polarity)
        .await?;
    Ok(NoContent)
}

/// The acting user's reaction on one target
///
/// GET /reactions?post_id={post_id} or ?comment_id={comment_id}
pub async fn get_reaction(
    State(state): State<AppState>,
    viewer: Viewer,
    QueryParams(query): QueryParams<ReactionQuery>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service
        .read_parts(viewer.user_id, query.post_id, query.comment_id)
        .await?;
    Ok(Json(reaction))
}

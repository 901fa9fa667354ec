//! User listing handlers

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{ApiResponse, PostResponse, UserPostsQuery};
use forum_service::FeedService;

use crate::extractors::{OptionalViewer, QueryParams, UserIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Posts a user wrote (`kind=created`) or likes (`kind=liked`)
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    viewer: OptionalViewer,
    Path(path): Path<UserIdPath>,
    QueryParams(query): QueryParams<UserPostsQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PostResponse>>>> {
    let user_id = path.user_id()?;

    let service = FeedService::new(state.service_context());
    let posts = service
        .user_posts(user_id, query.kind, viewer.user_id())
        .await?;
    Ok(Json(ApiResponse::new(posts)))
}

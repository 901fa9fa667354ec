//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{CommentResponse, CreateCommentRequest};
use forum_service::CommentService;

use crate::extractors::{PostIdPath, ValidatedJson, Viewer};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Add comment to a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = path.post_id()?;

    let service = CommentService::new(state.service_context());
    let comment = service
        .add_comment(post_id, viewer.user_id, &request.content)
        .await?;
    Ok(Created(Json(comment)))
}

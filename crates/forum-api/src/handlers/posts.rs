//! Post handlers
//!
//! The feed, post creation and post detail.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{
    ApiResponse, CreatePostRequest, FeedQuery, PostDetailResponse, PostResponse, StatsResponse,
};
use forum_service::{CategoryFilter, FeedService, PostService};

use crate::extractors::{OptionalViewer, PostIdPath, QueryParams, ValidatedJson, Viewer};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Feed, optionally filtered by categories
///
/// GET /posts?category=minecraft,general
pub async fn list_posts(
    State(state): State<AppState>,
    viewer: OptionalViewer,
    QueryParams(query): QueryParams<FeedQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PostResponse>>>> {
    let filter = CategoryFilter::new(query.categories());

    let service = FeedService::new(state.service_context());
    let posts = service.feed(&filter, viewer.user_id()).await?;
    Ok(Json(ApiResponse::new(posts)))
}

/// Create post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    viewer: Viewer,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(viewer.user_id, request).await?;
    Ok(Created(Json(post)))
}

/// Post with stats and comments
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalViewer,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostDetailResponse>> {
    let post_id = path.post_id()?;

    let service = FeedService::new(state.service_context());
    let detail = service.post_detail(post_id, viewer.user_id()).await?;
    Ok(Json(detail))
}

/// Stats of one post
///
/// GET /posts/{post_id}/stats
pub async fn get_post_stats(
    State(state): State<AppState>,
    viewer: OptionalViewer,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<StatsResponse>> {
    let post_id = path.post_id()?;

    let service = FeedService::new(state.service_context());
    let stats = service.post_stats(post_id, viewer.user_id()).await?;
    Ok(Json(stats))
}

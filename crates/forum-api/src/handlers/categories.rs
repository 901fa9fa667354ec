//! Category handlers

use axum::{extract::State, Json};
use forum_service::dto::{ApiResponse, CategoryResponse};
use forum_service::CategoryResolver;

use crate::response::ApiResult;
use crate::state::AppState;

/// Every known category, sorted by name
///
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryResponse>>>> {
    let categories = CategoryResolver::new(state.service_context())
        .list_categories()
        .await?;
    Ok(Json(ApiResponse::new(categories)))
}

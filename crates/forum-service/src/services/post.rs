//! Post service
//!
//! Authoring path for posts. Categories are normalized, de-duplicated,
//! optionally checked against an allow-list, and created on first use in the
//! same write as the post.

use chrono::Utc;
use forum_core::entities::{CategorizedPost, NewPost, Post, StatsSnapshot};
use forum_core::{CategoryName, DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreatePostRequest, PostResponse, PostWithStats};

use super::category::CategoryResolver;
use super::context::ServiceContext;
use super::error::ServiceResult;

const TITLE_MAX_CHARS: usize = 50;
const CONTENT_MAX_CHARS: usize = 1000;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post
    #[instrument(skip(self, request), fields(title_len = request.title.len()))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        request.validate()?;

        let title = normalize_title(&request.title)?;
        let content = request.content.trim().to_string();
        check_length("content", &content, CONTENT_MAX_CHARS)?;
        let categories = self.categories(&request.categories)?;

        let post = Post {
            id: self.ctx.generate_id(),
            author_id,
            title,
            content,
            created_at: Utc::now(),
        };
        let new_post = NewPost {
            post: post.clone(),
            categories,
        };

        self.ctx.post_repo().create(&new_post).await?;

        info!(
            post_id = %post.id,
            author_id = %author_id,
            categories = new_post.categories.len(),
            "Post created"
        );

        let created = CategorizedPost {
            post,
            categories: sorted_names(&new_post.categories),
        };
        let display_categories = CategoryResolver::new(self.ctx).display_categories(&created);
        Ok(PostResponse::from(PostWithStats {
            post: created,
            display_categories,
            stats: StatsSnapshot::default(),
        }))
    }

    fn categories(&self, raw: &[String]) -> ServiceResult<Vec<CategoryName>> {
        let names = CategoryName::parse_many(raw.iter().map(String::as_str));
        if names.is_empty() {
            return Err(
                DomainError::ValidationError("pick at least one category".to_string()).into(),
            );
        }

        // Filters are comma-separated, so such a name could never be selected
        if let Some(name) = names.iter().find(|n| n.as_str().contains(',')) {
            return Err(DomainError::ValidationError(format!(
                "category names cannot contain commas: {name}"
            ))
            .into());
        }

        let allowed = &self.ctx.feed_config().allowed_categories;
        if !allowed.is_empty() {
            if let Some(name) = names.iter().find(|n| !allowed.iter().any(|a| n.matches(a))) {
                return Err(DomainError::UnknownCategory(name.to_string()).into());
            }
        }

        Ok(names)
    }
}

/// Fold line breaks into spaces and trim
fn normalize_title(raw: &str) -> ServiceResult<String> {
    let title = raw.replace("\r\n", " ").replace(['\r', '\n'], " ");
    let title = title.trim().to_string();
    check_length("title", &title, TITLE_MAX_CHARS)?;
    Ok(title)
}

fn check_length(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    if value.is_empty() {
        return Err(DomainError::ValidationError(format!("{field} cannot be empty")).into());
    }
    if value.chars().count() > max {
        return Err(DomainError::ContentTooLong { max }.into());
    }
    Ok(())
}

fn sorted_names(names: &[CategoryName]) -> Vec<String> {
    let mut sorted: Vec<String> = names.iter().map(ToString::to_string).collect();
    sorted.sort();
    sorted
}

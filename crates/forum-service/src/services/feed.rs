//! Feed service
//!
//! Composes category resolution (or another listing) with one batched stats
//! pass over the whole result set. Listings are newest first, with insertion
//! order breaking ties.

use forum_core::entities::CategorizedPost;
use forum_core::traits::PostListing;
use forum_core::{DomainError, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{
    CommentResponse, CommentWithStats, PostDetailResponse, PostResponse, PostWithStats,
    StatsResponse, UserPostsKind,
};

use super::category::{CategoryFilter, CategoryResolver};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::stats::StatsAggregator;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Posts matching a category filter, decorated with stats
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        filter: &CategoryFilter,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = CategoryResolver::new(self.ctx).resolve(filter).await?;
        self.decorate(posts, viewer).await
    }

    /// Posts a user wrote, or posts a user currently likes
    #[instrument(skip(self))]
    pub async fn user_posts(
        &self,
        user_id: Snowflake,
        kind: UserPostsKind,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        let listing = match kind {
            UserPostsKind::Created => PostListing::AuthoredBy(user_id),
            UserPostsKind::Liked => PostListing::LikedBy(user_id),
        };

        let posts = self
            .ctx
            .within_deadline("post listing", self.ctx.post_repo().list(&listing))
            .await?;
        self.decorate(posts, viewer).await
    }

    /// One post with its stats and its comments, most liked first
    #[instrument(skip(self))]
    pub async fn post_detail(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostDetailResponse> {
        let post = self
            .ctx
            .within_deadline("post lookup", self.ctx.post_repo().find_by_id(post_id))
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        let comments = self
            .ctx
            .within_deadline("comment listing", self.ctx.comment_repo().find_by_post(post_id))
            .await?;

        let aggregator = StatsAggregator::new(self.ctx);
        let mut post_stats = aggregator.aggregate(&[post_id], viewer).await?;
        let comment_ids: Vec<Snowflake> = comments.iter().map(|c| c.id).collect();
        let comment_stats = aggregator.aggregate_comments(&comment_ids, viewer).await?;

        let display_categories = CategoryResolver::new(self.ctx).display_categories(&post);
        let mut comments: Vec<CommentResponse> = comments
            .into_iter()
            .map(|comment| {
                let stats = comment_stats.get(&comment.id).copied().unwrap_or_default();
                CommentResponse::from(CommentWithStats { comment, stats })
            })
            .collect();
        // Stable: equally liked comments stay oldest first
        comments.sort_by(|a, b| b.stats.likes.cmp(&a.stats.likes));

        Ok(PostDetailResponse {
            post: PostResponse::from(PostWithStats {
                post,
                display_categories,
                stats: post_stats.remove(&post_id).unwrap_or_default(),
            }),
            comments,
        })
    }

    /// Stats of a single post
    #[instrument(skip(self))]
    pub async fn post_stats(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<StatsResponse> {
        let exists = self
            .ctx
            .within_deadline("post lookup", self.ctx.post_repo().exists(post_id))
            .await?;
        if !exists {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let mut stats = StatsAggregator::new(self.ctx).aggregate(&[post_id], viewer).await?;
        Ok(stats.remove(&post_id).unwrap_or_default().into())
    }

    /// Attach stats and display categories, keeping the listing order
    async fn decorate(
        &self,
        posts: Vec<CategorizedPost>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = posts.iter().map(CategorizedPost::id).collect();
        let stats = StatsAggregator::new(self.ctx).aggregate(&ids, viewer).await?;
        let resolver = CategoryResolver::new(self.ctx);

        debug!(count = posts.len(), "Decorated posts");
        Ok(posts
            .into_iter()
            .map(|post| {
                let display_categories = resolver.display_categories(&post);
                let stats = stats.get(&post.id()).copied().unwrap_or_default();
                PostResponse::from(PostWithStats {
                    post,
                    display_categories,
                    stats,
                })
            })
            .collect())
    }
}

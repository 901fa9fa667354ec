//! Category resolver
//!
//! Normalizes category names (trim + lowercase, the same rule applied when
//! they are stored) and turns a feed filter into a post listing. Several
//! categories combine as a union; each post keeps its full category list.

use forum_core::entities::CategorizedPost;
use forum_core::traits::PostListing;
use forum_core::CategoryName;
use tracing::{debug, instrument};

use crate::dto::CategoryResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// A cleaned category filter: normalized, without blanks or duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    names: Vec<CategoryName>,
}

impl CategoryFilter {
    /// Build a filter from raw names; names that normalize to empty are dropped
    pub fn new<'a, I>(raw: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            names: CategoryName::parse_many(raw),
        }
    }

    /// Filter on a single category
    pub fn single(raw: &str) -> Self {
        Self::new([raw])
    }

    /// No filter at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[CategoryName] {
        &self.names
    }
}

/// Category resolver
pub struct CategoryResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CategoryResolver<'a> {
    /// Create a new CategoryResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The listing a filter stands for, or `None` when it selects nothing
    pub fn listing_for(&self, filter: &CategoryFilter) -> Option<PostListing> {
        if !filter.is_empty() {
            Some(PostListing::InCategories(filter.names().to_vec()))
        } else if self.ctx.feed_config().empty_filter_returns_all {
            Some(PostListing::All)
        } else {
            None
        }
    }

    /// Posts in one category; a blank name means no filter
    pub async fn resolve_single(&self, raw: &str) -> ServiceResult<Vec<CategorizedPost>> {
        self.resolve(&CategoryFilter::single(raw)).await
    }

    /// Posts in any of the given categories, de-duplicated
    pub async fn resolve_many(&self, raw: &[&str]) -> ServiceResult<Vec<CategorizedPost>> {
        self.resolve(&CategoryFilter::new(raw.iter().copied())).await
    }

    /// Posts matching a cleaned filter, newest first
    #[instrument(skip(self))]
    pub async fn resolve(&self, filter: &CategoryFilter) -> ServiceResult<Vec<CategorizedPost>> {
        let Some(listing) = self.listing_for(filter) else {
            debug!("Empty category filter selects no posts");
            return Ok(Vec::new());
        };

        self.ctx
            .within_deadline("post listing", self.ctx.post_repo().list(&listing))
            .await
    }

    /// Category names to show for a post
    pub fn display_categories(&self, post: &CategorizedPost) -> Vec<String> {
        post.display_categories(&self.ctx.feed_config().default_category)
    }

    /// Every known category, sorted by name
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ServiceResult<Vec<CategoryResponse>> {
        let categories = self
            .ctx
            .within_deadline("category listing", self.ctx.category_repo().list())
            .await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{memory_context, memory_context_with, seed_post};
    use forum_common::FeedConfig;
    use forum_core::Snowflake;

    fn ids(posts: &[CategorizedPost]) -> Vec<Snowflake> {
        posts.iter().map(CategorizedPost::id).collect()
    }

    #[test]
    fn test_filter_normalizes_and_dedupes() {
        let a = CategoryFilter::new(["Minecraft", " minecraft "]);
        let b = CategoryFilter::new(["minecraft"]);
        assert_eq!(a, b);
        assert_eq!(a.names().len(), 1);
    }

    #[test]
    fn test_filter_drops_blank_names() {
        let filter = CategoryFilter::new(["", "  ", "\t"]);
        assert!(filter.is_empty());
        assert_eq!(filter, CategoryFilter::none());
    }

    #[tokio::test]
    async fn test_equivalent_filters_resolve_identically() {
        let (ctx, _store) = memory_context();
        seed_post(&ctx, 1, &["minecraft"]).await;
        seed_post(&ctx, 1, &["general"]).await;
        let resolver = CategoryResolver::new(&ctx);

        let messy = resolver.resolve_many(&["Minecraft", " minecraft "]).await.unwrap();
        let clean = resolver.resolve_many(&["minecraft"]).await.unwrap();
        assert_eq!(messy, clean);
        assert_eq!(messy.len(), 1);
    }

    #[tokio::test]
    async fn test_union_without_duplicates() {
        let (ctx, _store) = memory_context();
        let both = seed_post(&ctx, 1, &["general", "minecraft"]).await;
        let general = seed_post(&ctx, 1, &["general"]).await;
        let minecraft = seed_post(&ctx, 1, &["Minecraft"]).await;
        seed_post(&ctx, 1, &["souls games"]).await;

        let posts = CategoryResolver::new(&ctx)
            .resolve_many(&["general", "minecraft"])
            .await
            .unwrap();

        let found = ids(&posts);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&both) && found.contains(&general) && found.contains(&minecraft));
        let both_post = posts.iter().find(|p| p.id() == both).unwrap();
        assert_eq!(both_post.categories, vec!["general", "minecraft"]);
    }

    #[tokio::test]
    async fn test_single_category_and_blank_filter() {
        let (ctx, _store) = memory_context();
        let minecraft = seed_post(&ctx, 1, &["minecraft"]).await;
        seed_post(&ctx, 1, &["general"]).await;
        let resolver = CategoryResolver::new(&ctx);

        let posts = resolver.resolve_single(" MINECRAFT").await.unwrap();
        assert_eq!(ids(&posts), vec![minecraft]);

        // Normalizes to empty, so it falls back to no filter
        let all = resolver.resolve_single("   ").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_filter_policy_is_configurable() {
        let (ctx, store) = memory_context_with(FeedConfig {
            empty_filter_returns_all: false,
            ..FeedConfig::default()
        });
        seed_post(&ctx, 1, &["general"]).await;
        store.reset_query_count();

        let posts = CategoryResolver::new(&ctx).resolve(&CategoryFilter::none()).await.unwrap();
        assert!(posts.is_empty());
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_display_default_for_unlinked_post() {
        let (ctx, _store) = memory_context_with(FeedConfig {
            default_category: "misc".to_string(),
            ..FeedConfig::default()
        });
        seed_post(&ctx, 1, &[]).await;
        let resolver = CategoryResolver::new(&ctx);

        let posts = resolver.resolve(&CategoryFilter::none()).await.unwrap();
        assert!(posts[0].categories.is_empty());
        assert_eq!(resolver.display_categories(&posts[0]), vec!["misc"]);
    }

    #[tokio::test]
    async fn test_list_categories_respects_deadline() {
        let (ctx, store) = memory_context_with(FeedConfig {
            query_timeout_ms: 10,
            ..FeedConfig::default()
        });
        seed_post(&ctx, 1, &["general"]).await;
        store.set_latency(Some(std::time::Duration::from_millis(200)));

        let err = CategoryResolver::new(&ctx).list_categories().await.unwrap_err();
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_list_categories_sorted() {
        let (ctx, _store) = memory_context();
        seed_post(&ctx, 1, &["Story Games", "general"]).await;
        seed_post(&ctx, 1, &["minecraft", "GENERAL"]).await;

        let names: Vec<String> = CategoryResolver::new(&ctx)
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["general", "minecraft", "story games"]);
    }
}

//! Service context - dependency container for services
//!
//! Holds all repositories, the ID generator and the feed policy needed by services.

use std::future::Future;
use std::sync::Arc;

use forum_common::FeedConfig;
use forum_core::traits::{
    CategoryRepository, CommentRepository, PostRepository, ReactionRepository, RepoResult,
    StatsRepository, StoreHealth,
};
use forum_core::{DomainError, Snowflake, SnowflakeGenerator};
use forum_db::{
    InMemoryStore, PgCategoryRepository, PgCommentRepository, PgPool, PgPostRepository,
    PgReactionRepository, PgStatsRepository, PgStoreHealth,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or the in-memory store, behind the same traits)
/// - A store health probe
/// - Snowflake generator for ID generation
/// - Feed policy (display default, empty-filter behavior, deadlines)
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    stats_repo: Arc<dyn StatsRepository>,
    store_health: Arc<dyn StoreHealth>,

    snowflake_generator: Arc<SnowflakeGenerator>,
    feed_config: Arc<FeedConfig>,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the category repository
    pub fn category_repo(&self) -> &dyn CategoryRepository {
        self.category_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the stats repository
    pub fn stats_repo(&self) -> &dyn StatsRepository {
        self.stats_repo.as_ref()
    }

    /// Get the store health probe
    pub fn store_health(&self) -> &dyn StoreHealth {
        self.store_health.as_ref()
    }

    // === Configuration ===

    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }

    // === IDs ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Run one feed read under the configured deadline.
    ///
    /// Running out of time is reported as `StoreUnavailable`, like any other
    /// failure to reach the store.
    pub(crate) async fn within_deadline<T, F>(&self, what: &str, read: F) -> ServiceResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        let deadline = self.feed_config.query_timeout();
        match tokio::time::timeout(deadline, read).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DomainError::StoreUnavailable(format!(
                "{what} exceeded {} ms",
                deadline.as_millis()
            ))
            .into()),
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("feed_config", &self.feed_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    category_repo: Option<Arc<dyn CategoryRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    stats_repo: Option<Arc<dyn StatsRepository>>,
    store_health: Option<Arc<dyn StoreHealth>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    feed_config: FeedConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire every repository to PostgreSQL
    pub fn postgres(self, pool: PgPool) -> Self {
        self.post_repo(Arc::new(PgPostRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .category_repo(Arc::new(PgCategoryRepository::new(pool.clone())))
            .reaction_repo(Arc::new(PgReactionRepository::new(pool.clone())))
            .stats_repo(Arc::new(PgStatsRepository::new(pool.clone())))
            .store_health(Arc::new(PgStoreHealth::new(pool)))
    }

    /// Wire every repository to one in-memory store
    pub fn memory(self, store: Arc<InMemoryStore>) -> Self {
        self.post_repo(store.clone())
            .comment_repo(store.clone())
            .category_repo(store.clone())
            .reaction_repo(store.clone())
            .stats_repo(store.clone())
            .store_health(store)
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn category_repo(mut self, repo: Arc<dyn CategoryRepository>) -> Self {
        self.category_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn stats_repo(mut self, repo: Arc<dyn StatsRepository>) -> Self {
        self.stats_repo = Some(repo);
        self
    }

    pub fn store_health(mut self, probe: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(probe);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn feed_config(mut self, config: FeedConfig) -> Self {
        self.feed_config = config;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            post_repo: self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            category_repo: self
                .category_repo
                .ok_or_else(|| ServiceError::validation("category_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            stats_repo: self
                .stats_repo
                .ok_or_else(|| ServiceError::validation("stats_repo is required"))?,
            store_health: self
                .store_health
                .ok_or_else(|| ServiceError::validation("store_health is required"))?,
            snowflake_generator: self.snowflake_generator.unwrap_or_default(),
            feed_config: Arc::new(self.feed_config),
        })
    }
}

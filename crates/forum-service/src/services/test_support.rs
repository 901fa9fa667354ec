//! Shared fixtures for service tests, backed by the in-memory store

use std::sync::Arc;

use chrono::{DateTime, Utc};
use forum_common::FeedConfig;
use forum_core::entities::{Comment, NewPost, Post};
use forum_core::{CategoryName, Snowflake};
use forum_db::InMemoryStore;

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) fn memory_context() -> (ServiceContext, Arc<InMemoryStore>) {
    memory_context_with(FeedConfig::default())
}

pub(crate) fn memory_context_with(feed: FeedConfig) -> (ServiceContext, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let ctx = ServiceContextBuilder::new()
        .memory(store.clone())
        .feed_config(feed)
        .build()
        .unwrap();
    (ctx, store)
}

pub(crate) async fn seed_post(ctx: &ServiceContext, author: i64, categories: &[&str]) -> Snowflake {
    seed_post_at(ctx, author, categories, Utc::now()).await
}

pub(crate) async fn seed_post_at(
    ctx: &ServiceContext,
    author: i64,
    categories: &[&str],
    created_at: DateTime<Utc>,
) -> Snowflake {
    let id = ctx.generate_id();
    let new_post = NewPost {
        post: Post {
            id,
            author_id: Snowflake::new(author),
            title: format!("post {id}"),
            content: "body".to_string(),
            created_at,
        },
        categories: CategoryName::parse_many(categories.iter().copied()),
    };
    ctx.post_repo().create(&new_post).await.unwrap();
    id
}

pub(crate) async fn seed_comment(
    ctx: &ServiceContext,
    post_id: Snowflake,
    author: i64,
    content: &str,
) -> Snowflake {
    let id = ctx.generate_id();
    let comment = Comment {
        id,
        post_id,
        author_id: Snowflake::new(author),
        content: content.to_string(),
        created_at: Utc::now(),
    };
    ctx.comment_repo().create(&comment).await.unwrap();
    id
}

//! In-memory store

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, instrument};

use forum_core::entities::{
    CategorizedPost, Category, Comment, NewPost, Post, Reaction, ToggleOutcome,
};
use forum_core::error::DomainError;
use forum_core::traits::{
    CategoryRepository, CommentRepository, PostListing, PostRepository, ReactionRepository,
    RepoResult, StatsGroupings, StatsRepository, StoreHealth,
};
use forum_core::value_objects::{CategoryName, Polarity, ReactionTarget, Snowflake, TargetKind};

/// A stored post with the names of its linked categories, sorted
struct PostRecord {
    post: Post,
    categories: Vec<CategoryName>,
}

impl PostRecord {
    fn to_categorized(&self) -> CategorizedPost {
        CategorizedPost {
            post: self.post.clone(),
            categories: self.categories.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Thread-safe in-memory store.
///
/// Lock order is `snapshot` -> `posts` -> `comments` -> `categories`.
/// Reaction writers hold `snapshot` shared, so toggles on different keys run
/// in parallel while a stats read holds it exclusively for a consistent view.
pub struct InMemoryStore {
    /// Posts in insertion order
    posts: RwLock<Vec<PostRecord>>,
    /// Comments in insertion order
    comments: RwLock<Vec<Comment>>,
    categories: RwLock<BTreeMap<CategoryName, Category>>,
    reactions: DashMap<(Snowflake, ReactionTarget), Reaction>,
    snapshot: RwLock<()>,
    next_category_id: AtomicI64,
    queries: AtomicU64,
    available: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            comments: RwLock::new(Vec::new()),
            categories: RwLock::new(BTreeMap::new()),
            reactions: DashMap::new(),
            snapshot: RwLock::new(()),
            next_category_id: AtomicI64::new(1),
            queries: AtomicU64::new(0),
            available: AtomicBool::new(true),
            latency: Mutex::new(None),
        }
    }

    /// Number of store round trips issued so far.
    ///
    /// Each statement a relational backend would send counts as one, so a
    /// stats load over posts with a viewer counts four.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    pub fn reset_query_count(&self) {
        self.queries.store(0, Ordering::Relaxed);
    }

    /// Simulate an outage: every operation fails with `StoreUnavailable`
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Delay every operation, to exercise caller deadlines
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.lock() = latency;
    }

    /// Number of stored reactions across all users and targets
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Common entry for every operation: latency, availability, accounting
    async fn round_trips(&self, queries: u64) -> RepoResult<()> {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if !self.available.load(Ordering::Relaxed) {
            return Err(DomainError::StoreUnavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        self.queries.fetch_add(queries, Ordering::Relaxed);
        Ok(())
    }

    fn post_exists(&self, id: Snowflake) -> bool {
        self.posts.read().iter().any(|r| r.post.id == id)
    }

    fn comment_exists(&self, id: Snowflake) -> bool {
        self.comments.read().iter().any(|c| c.id == id)
    }

    fn is_liked_by(&self, user_id: Snowflake, post_id: Snowflake) -> bool {
        self.reactions
            .get(&(user_id, ReactionTarget::Post(post_id)))
            .is_some_and(|r| r.polarity == Polarity::Like)
    }

    fn matches(&self, record: &PostRecord, listing: &PostListing) -> bool {
        match listing {
            PostListing::All => true,
            PostListing::InCategories(names) => record.categories.iter().any(|c| names.contains(c)),
            PostListing::AuthoredBy(user_id) => record.post.author_id == *user_id,
            PostListing::LikedBy(user_id) => self.is_liked_by(*user_id, record.post.id),
        }
    }

    fn target(kind: TargetKind, id: Snowflake) -> ReactionTarget {
        match kind {
            TargetKind::Post => ReactionTarget::Post(id),
            TargetKind::Comment => ReactionTarget::Comment(id),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CategorizedPost>> {
        self.round_trips(1).await?;
        Ok(self
            .posts
            .read()
            .iter()
            .find(|r| r.post.id == id)
            .map(PostRecord::to_categorized))
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        self.round_trips(1).await?;
        Ok(self.post_exists(id))
    }

    #[instrument(skip(self))]
    async fn list(&self, listing: &PostListing) -> RepoResult<Vec<CategorizedPost>> {
        self.round_trips(1).await?;
        let posts = self.posts.read();

        let mut listed: Vec<&PostRecord> =
            posts.iter().filter(|r| self.matches(r, listing)).collect();
        // Stable sort keeps insertion order among equal timestamps
        listed.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));

        debug!(count = listed.len(), "Listed posts");
        Ok(listed.into_iter().map(PostRecord::to_categorized).collect())
    }

    #[instrument(skip(self, new_post), fields(post_id = %new_post.post.id))]
    async fn create(&self, new_post: &NewPost) -> RepoResult<()> {
        self.round_trips(3).await?;
        let mut posts = self.posts.write();
        let mut categories = self.categories.write();

        if posts.iter().any(|r| r.post.id == new_post.post.id) {
            return Err(DomainError::StoreUnavailable(format!(
                "duplicate post id {}",
                new_post.post.id
            )));
        }

        for name in &new_post.categories {
            categories.entry(name.clone()).or_insert_with(|| Category {
                id: Snowflake::new(self.next_category_id.fetch_add(1, Ordering::Relaxed)),
                name: name.clone(),
            });
        }

        let mut linked = new_post.categories.clone();
        linked.sort();
        linked.dedup();

        posts.push(PostRecord {
            post: new_post.post.clone(),
            categories: linked,
        });
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        self.round_trips(1).await?;
        Ok(self.comment_exists(id))
    }

    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>> {
        self.round_trips(1).await?;
        let mut comments: Vec<Comment> = self
            .comments
            .read()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, post_id = %comment.post_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.round_trips(1).await?;
        if !self.post_exists(comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        self.comments.write().push(comment.clone());
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        self.round_trips(1).await?;
        Ok(self.categories.read().values().cloned().collect())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        new_id: Snowflake,
        user_id: Snowflake,
        target: ReactionTarget,
        polarity: Polarity,
    ) -> RepoResult<ToggleOutcome> {
        self.round_trips(2).await?;
        let _writer = self.snapshot.read();

        let target_exists = match target {
            ReactionTarget::Post(id) => self.post_exists(id),
            ReactionTarget::Comment(id) => self.comment_exists(id),
        };
        if !target_exists {
            return Err(match target {
                ReactionTarget::Post(id) => DomainError::PostNotFound(id),
                ReactionTarget::Comment(id) => DomainError::CommentNotFound(id),
            });
        }

        // The entry holds the shard lock for the whole read-modify-write
        let outcome = match self.reactions.entry((user_id, target)) {
            Entry::Occupied(mut entry) => {
                let outcome = ToggleOutcome::decide(Some(entry.get().polarity), polarity);
                match outcome {
                    ToggleOutcome::Removed => {
                        entry.remove();
                    }
                    _ => entry.get_mut().polarity = polarity,
                }
                outcome
            }
            Entry::Vacant(entry) => {
                entry.insert(Reaction::new(new_id, user_id, target, polarity));
                ToggleOutcome::Created
            }
        };

        debug!(outcome = outcome.as_str(), "Reaction toggled");
        Ok(outcome)
    }

    async fn find(
        &self,
        user_id: Snowflake,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        self.round_trips(1).await?;
        Ok(self.reactions.get(&(user_id, target)).map(|r| r.polarity))
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    #[instrument(skip(self, ids), fields(batch = ids.len()))]
    async fn load_groupings(
        &self,
        kind: TargetKind,
        ids: &[Snowflake],
        viewer: Option<Snowflake>,
    ) -> RepoResult<StatsGroupings> {
        let statements = match kind {
            TargetKind::Post => 3,
            TargetKind::Comment => 2,
        } + u64::from(viewer.is_some());
        self.round_trips(statements).await?;

        let wanted: HashSet<Snowflake> = ids.iter().copied().collect();
        let mut groupings = StatsGroupings::default();

        // Exclusive snapshot: no toggle or comment lands mid-read
        let _reader = self.snapshot.write();
        let comments = self.comments.read();

        for entry in &self.reactions {
            let target = entry.key().1;
            if target.kind() != kind || !wanted.contains(&target.id()) {
                continue;
            }
            let counts = match entry.value().polarity {
                Polarity::Like => &mut groupings.likes,
                Polarity::Dislike => &mut groupings.dislikes,
            };
            *counts.entry(target.id()).or_insert(0) += 1;
        }

        if kind == TargetKind::Post {
            for comment in comments.iter().filter(|c| wanted.contains(&c.post_id)) {
                *groupings.comments.entry(comment.post_id).or_insert(0) += 1;
            }
        }

        if let Some(viewer) = viewer {
            groupings.viewer = wanted
                .iter()
                .filter_map(|id| {
                    self.reactions
                        .get(&(viewer, Self::target(kind, *id)))
                        .map(|r| (*id, r.polarity))
                })
                .collect::<HashMap<_, _>>();
        }

        Ok(groupings)
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        self.round_trips(0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::sync::Arc;

    fn post(id: i64, author: i64) -> Post {
        Post {
            id: Snowflake::new(id),
            author_id: Snowflake::new(author),
            title: format!("post {id}"),
            content: "body".to_string(),
            created_at: Utc::now(),
        }
    }

    fn names(raw: &[&str]) -> Vec<CategoryName> {
        CategoryName::parse_many(raw.iter().copied())
    }

    async fn seed_post(store: &InMemoryStore, id: i64, categories: &[&str]) {
        PostRepository::create(
            store,
            &NewPost {
                post: post(id, 1),
                categories: names(categories),
            },
        )
        .await
        .unwrap();
    }

    fn comment(id: i64, post_id: i64) -> Comment {
        Comment {
            id: Snowflake::new(id),
            post_id: Snowflake::new(post_id),
            author_id: Snowflake::new(1),
            content: "hi".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_toggle_three_way() {
        let store = InMemoryStore::new();
        seed_post(&store, 7, &["general"]).await;
        let user = Snowflake::new(100);
        let target = ReactionTarget::Post(Snowflake::new(7));

        let first = store.toggle(Snowflake::new(1), user, target, Polarity::Like).await.unwrap();
        assert_eq!(first, ToggleOutcome::Created);

        let second = store
            .toggle(Snowflake::new(2), user, target, Polarity::Dislike)
            .await
            .unwrap();
        assert_eq!(second, ToggleOutcome::Flipped);
        assert_eq!(store.find(user, target).await.unwrap(), Some(Polarity::Dislike));
        assert_eq!(store.reaction_count(), 1);

        let third = store
            .toggle(Snowflake::new(3), user, target, Polarity::Dislike)
            .await
            .unwrap();
        assert_eq!(third, ToggleOutcome::Removed);
        assert_eq!(store.find(user, target).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_toggle_unknown_target() {
        let store = InMemoryStore::new();
        let err = store
            .toggle(
                Snowflake::new(1),
                Snowflake::new(2),
                ReactionTarget::Comment(Snowflake::new(99)),
                Polarity::Like,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_COMMENT");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_never_duplicate() {
        let store = Arc::new(InMemoryStore::new());
        seed_post(&store, 7, &[]).await;
        let user = Snowflake::new(100);
        let target = ReactionTarget::Post(Snowflake::new(7));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.toggle(Snowflake::new(1000 + i), user, target, Polarity::Like).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // An even number of same-polarity toggles leaves nothing behind
        assert_eq!(store.reaction_count(), 0);
    }

    #[tokio::test]
    async fn test_listing_order_and_ties() {
        let store = InMemoryStore::new();
        let now = Utc::now();
        for (id, offset) in [(1, 0), (2, 5), (3, 5), (4, 1)] {
            let mut p = post(id, 1);
            p.created_at = now + ChronoDuration::seconds(offset);
            PostRepository::create(
                &store,
                &NewPost {
                    post: p,
                    categories: Vec::new(),
                },
            )
            .await
            .unwrap();
        }

        let ids: Vec<i64> = PostRepository::list(&store, &PostListing::All)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id().into_inner())
            .collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[tokio::test]
    async fn test_category_union_keeps_full_lists() {
        let store = InMemoryStore::new();
        seed_post(&store, 1, &["Minecraft", "general"]).await;
        seed_post(&store, 2, &["general"]).await;
        seed_post(&store, 3, &["souls games"]).await;

        let filter = PostListing::InCategories(names(&["general", "minecraft"]));
        let listed = PostRepository::list(&store, &filter).await.unwrap();
        assert_eq!(listed.len(), 2);
        let first = listed.iter().find(|p| p.id() == Snowflake::new(1)).unwrap();
        assert_eq!(first.categories, vec!["general", "minecraft"]);

        let categories = CategoryRepository::list(&store).await.unwrap();
        let sorted: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(sorted, vec!["general", "minecraft", "souls games"]);
    }

    #[tokio::test]
    async fn test_groupings_and_query_count() {
        let store = InMemoryStore::new();
        seed_post(&store, 7, &[]).await;
        seed_post(&store, 8, &[]).await;
        CommentRepository::create(&store, &comment(70, 7)).await.unwrap();
        let target = ReactionTarget::Post(Snowflake::new(7));
        store
            .toggle(Snowflake::new(1), Snowflake::new(100), target, Polarity::Like)
            .await
            .unwrap();
        store
            .toggle(Snowflake::new(2), Snowflake::new(200), target, Polarity::Dislike)
            .await
            .unwrap();

        store.reset_query_count();
        let ids = [Snowflake::new(7), Snowflake::new(8)];
        let groupings = store
            .load_groupings(TargetKind::Post, &ids, Some(Snowflake::new(100)))
            .await
            .unwrap();
        assert_eq!(store.query_count(), 4);

        assert_eq!(groupings.likes.get(&Snowflake::new(7)), Some(&1));
        assert_eq!(groupings.dislikes.get(&Snowflake::new(7)), Some(&1));
        assert_eq!(groupings.comments.get(&Snowflake::new(7)), Some(&1));
        assert_eq!(groupings.viewer.get(&Snowflake::new(7)), Some(&Polarity::Like));
        assert!(!groupings.likes.contains_key(&Snowflake::new(8)));
    }

    #[tokio::test]
    async fn test_liked_by_listing() {
        let store = InMemoryStore::new();
        seed_post(&store, 1, &[]).await;
        seed_post(&store, 2, &[]).await;
        let user = Snowflake::new(5);
        let first = ReactionTarget::Post(Snowflake::new(1));
        let second = ReactionTarget::Post(Snowflake::new(2));
        store.toggle(Snowflake::new(10), user, first, Polarity::Like).await.unwrap();
        store.toggle(Snowflake::new(11), user, second, Polarity::Dislike).await.unwrap();

        let liked = PostRepository::list(&store, &PostListing::LikedBy(user)).await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id(), Snowflake::new(1));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = InMemoryStore::new();
        store.set_available(false);
        let err = store.ping().await.unwrap_err();
        assert_eq!(err.code(), "STORE_UNAVAILABLE");
    }
}

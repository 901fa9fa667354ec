//! API Integration Tests
//!
//! Each test starts its own server on an ephemeral port, backed by a fresh
//! in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;

const AUTHOR: i64 = 1;
const ALICE: i64 = 100;
const BOB: i64 = 200;

async fn feed(server: &TestServer, query: &str, viewer: Option<i64>) -> Vec<PostView> {
    let path = format!("/api/v1/posts{query}");
    let response = match viewer {
        Some(user) => server.get_as(&path, user).await.unwrap(),
        None => server.get(&path).await.unwrap(),
    };
    let list: ListResponse<PostView> = assert_json(response, StatusCode::OK).await.unwrap();
    list.data
}

async fn stats(server: &TestServer, post_id: &str, viewer: i64) -> Stats {
    let response = server
        .get_as(&format!("/api/v1/posts/{post_id}/stats"), viewer)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

fn ids(posts: &[PostView]) -> Vec<String> {
    posts.iter().map(|p| p.id.clone()).collect()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready_follows_store() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    server.store.set_available(false);
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_twice_clears_reaction() {
    let server = TestServer::start().await.unwrap();
    let post = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    server.toggle(ALICE, &ToggleReaction::post(&post, "like")).await.unwrap();
    server.toggle(ALICE, &ToggleReaction::post(&post, "like")).await.unwrap();

    let response = server
        .get_as(&format!("/api/v1/reactions?post_id={post}"), ALICE)
        .await
        .unwrap();
    let state: ReactionState = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.target.kind, "post");
    assert_eq!(state.target.id, post);
    assert!(state.polarity.is_none());
    assert_eq!(server.store.reaction_count(), 0);
}

#[tokio::test]
async fn test_two_viewers_and_a_flip() {
    let server = TestServer::start().await.unwrap();
    let post = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["minecraft"]))
        .await
        .unwrap();

    server.toggle(ALICE, &ToggleReaction::post(&post, "like")).await.unwrap();
    let seen = stats(&server, &post, ALICE).await;
    assert_eq!((seen.likes, seen.dislikes), (1, 0));
    assert_eq!(seen.viewer_reaction.as_deref(), Some("like"));

    server.toggle(BOB, &ToggleReaction::post(&post, "dislike")).await.unwrap();
    let seen = stats(&server, &post, BOB).await;
    assert_eq!((seen.likes, seen.dislikes), (1, 1));
    assert_eq!(seen.viewer_reaction.as_deref(), Some("dislike"));

    server.toggle(ALICE, &ToggleReaction::post(&post, "dislike")).await.unwrap();
    let seen = stats(&server, &post, ALICE).await;
    assert_eq!((seen.likes, seen.dislikes), (0, 2));
    assert_eq!(seen.viewer_reaction.as_deref(), Some("dislike"));
    assert_eq!(server.store.reaction_count(), 2);
}

#[tokio::test]
async fn test_concurrent_toggles_keep_one_row() {
    let server = Arc::new(TestServer::start().await.unwrap());
    let post = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    // An odd number of same-polarity toggles must end with one like
    let handles: Vec<_> = (0..11)
        .map(|_| {
            let server = Arc::clone(&server);
            let request = ToggleReaction::post(&post, "like");
            tokio::spawn(async move { server.toggle(ALICE, &request).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(server.store.reaction_count(), 1);
    let seen = stats(&server, &post, ALICE).await;
    assert_eq!(seen.likes, 1);
    assert_eq!(seen.viewer_reaction.as_deref(), Some("like"));
}

#[tokio::test]
async fn test_toggle_errors() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post_as("/api/v1/reactions", ALICE, &ToggleReaction::post("424242", "like"))
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_POST");

    let neither = ToggleReaction {
        post_id: None,
        comment_id: None,
        polarity: "like".to_string(),
    };
    let response = server.post_as("/api/v1/reactions", ALICE, &neither).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "TARGET_CONFLICT");

    let response = server
        .post("/api/v1/reactions", &ToggleReaction::post("1", "like"))
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(err.error.code, "MISSING_IDENTITY");
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_empty_feed_skips_aggregation() {
    let server = TestServer::start().await.unwrap();
    server.store.reset_query_count();

    let posts = feed(&server, "", Some(ALICE)).await;
    assert!(posts.is_empty());
    // The listing is the only store round trip
    assert_eq!(server.store.query_count(), 1);
}

#[tokio::test]
async fn test_filter_names_are_normalized() {
    let server = TestServer::start().await.unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["Minecraft"]))
        .await
        .unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    let plain = feed(&server, "?category=minecraft", None).await;
    let messy = feed(&server, "?category=Minecraft,%20minecraft%20", None).await;

    assert_eq!(plain.len(), 1);
    assert_eq!(ids(&plain), ids(&messy));
    assert_eq!(plain[0].categories, vec!["minecraft".to_string()]);
}

#[tokio::test]
async fn test_multi_category_union() {
    let server = TestServer::start().await.unwrap();
    let general = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    let minecraft = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["minecraft"]))
        .await
        .unwrap();
    let both = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["minecraft", "general"]))
        .await
        .unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["terraria"]))
        .await
        .unwrap();

    let posts = feed(&server, "?category=general,minecraft", None).await;
    let found: HashSet<String> = ids(&posts).into_iter().collect();
    assert_eq!(posts.len(), 3);
    assert_eq!(found, HashSet::from([general, minecraft, both.clone()]));

    // A post matched through one category still lists all of its categories
    let only_minecraft = feed(&server, "?category=minecraft", None).await;
    let shared = only_minecraft.iter().find(|p| p.id == both).unwrap();
    assert_eq!(shared.categories, vec!["general".to_string(), "minecraft".to_string()]);
}

#[tokio::test]
async fn test_feed_is_newest_first_with_viewer_state() {
    let server = TestServer::start().await.unwrap();
    let older = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    // Distinct creation timestamps; equal ones fall back to insertion order
    tokio::time::sleep(Duration::from_millis(5)).await;
    let newer = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    server.toggle(ALICE, &ToggleReaction::post(&older, "like")).await.unwrap();

    let posts = feed(&server, "", Some(ALICE)).await;
    assert_eq!(ids(&posts), vec![newer, older]);
    assert_eq!(posts[1].stats.viewer_reaction.as_deref(), Some("like"));
    assert!(posts[0].stats.viewer_reaction.is_none());

    let guest = feed(&server, "", None).await;
    assert_eq!(guest[1].stats.likes, 1);
    assert!(guest[1].stats.viewer_reaction.is_none());
}

#[tokio::test]
async fn test_aggregation_query_count_is_constant() {
    let server = TestServer::start().await.unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    server.store.reset_query_count();
    assert_eq!(feed(&server, "", Some(ALICE)).await.len(), 1);
    let single = server.store.query_count();

    for _ in 0..49 {
        server
            .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
            .await
            .unwrap();
    }

    server.store.reset_query_count();
    assert_eq!(feed(&server, "", Some(ALICE)).await.len(), 50);
    assert_eq!(server.store.query_count(), single);
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let server = TestServer::start().await.unwrap();
    server.store.set_available(false);

    let response = server.get("/api/v1/posts").await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(err.error.code, "STORE_UNAVAILABLE");
}

// ============================================================================
// Post and Comment Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_validation() {
    let server = TestServer::start().await.unwrap();

    let mut request = CreatePost::in_categories(&["general"]);
    request.title = String::new();
    let response = server.post_as("/api/v1/posts", AUTHOR, &request).await.unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "VALIDATION_ERROR");

    let response = server
        .post("/api/v1/posts", &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_post_detail_with_comments() {
    let server = TestServer::start().await.unwrap();
    let post = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    let path = format!("/api/v1/posts/{post}/comments");
    let response = server
        .post_as(&path, BOB, &CreateComment { content: "  first!  ".to_string() })
        .await
        .unwrap();
    let comment: CommentView = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.content, "first!");
    assert_eq!(comment.post_id, post);

    server
        .toggle(ALICE, &ToggleReaction::comment(&comment.id, "like"))
        .await
        .unwrap();

    let response = server.get_as(&format!("/api/v1/posts/{post}"), ALICE).await.unwrap();
    let detail: PostDetail = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.post.id, post);
    assert_eq!(detail.post.stats.comments, 1);
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].author_id, BOB.to_string());
    assert_eq!(detail.comments[0].stats.likes, 1);
    assert_eq!(detail.comments[0].stats.viewer_reaction.as_deref(), Some("like"));
}

#[tokio::test]
async fn test_comment_errors() {
    let server = TestServer::start().await.unwrap();
    let post = server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();

    let response = server
        .post_as(
            &format!("/api/v1/posts/{post}/comments"),
            BOB,
            &CreateComment { content: "x".repeat(101) },
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(err.error.code, "CONTENT_TOO_LONG");

    let response = server
        .post_as(
            "/api/v1/posts/424242/comments",
            BOB,
            &CreateComment { content: "hello".to_string() },
        )
        .await
        .unwrap();
    let err: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(err.error.code, "UNKNOWN_POST");
}

// ============================================================================
// User and Category Tests
// ============================================================================

#[tokio::test]
async fn test_user_listings() {
    let server = TestServer::start().await.unwrap();
    let mine = server
        .create_post(ALICE, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    let theirs = server
        .create_post(BOB, &CreatePost::in_categories(&["general"]))
        .await
        .unwrap();
    server.toggle(ALICE, &ToggleReaction::post(&theirs, "like")).await.unwrap();

    let response = server.get(&format!("/api/v1/users/{ALICE}/posts")).await.unwrap();
    let created: ListResponse<PostView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(&created.data), vec![mine]);

    let response = server
        .get_as(&format!("/api/v1/users/{ALICE}/posts?kind=liked"), ALICE)
        .await
        .unwrap();
    let liked: ListResponse<PostView> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ids(&liked.data), vec![theirs]);
    assert_eq!(liked.data[0].stats.viewer_reaction.as_deref(), Some("like"));

    let response = server.get("/api/v1/users/alice/posts").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_categories_are_listed_sorted() {
    let server = TestServer::start().await.unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["Terraria", "minecraft"]))
        .await
        .unwrap();
    server
        .create_post(AUTHOR, &CreatePost::in_categories(&["general", "MINECRAFT"]))
        .await
        .unwrap();

    let response = server.get("/api/v1/categories").await.unwrap();
    let list: ListResponse<CategoryView> = assert_json(response, StatusCode::OK).await.unwrap();
    let names: Vec<&str> = list.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["general", "minecraft", "terraria"]);
}

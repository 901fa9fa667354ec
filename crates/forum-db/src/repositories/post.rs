//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use forum_core::entities::{CategorizedPost, NewPost};
use forum_core::traits::{PostListing, PostRepository, RepoResult};
use forum_core::value_objects::Snowflake;

use crate::mappers::PostInsert;
use crate::models::PostModel;

use super::error::map_db_error;

/// Post columns plus the sorted category names, `NULL` when unlinked.
/// `{filter}` is replaced with the listing's WHERE clause.
const POST_SELECT: &str = r#"
    SELECT p.id, p.author_id, p.title, p.content, p.created_at,
           array_agg(c.name ORDER BY c.name) FILTER (WHERE c.name IS NOT NULL) AS categories
    FROM posts p
    LEFT JOIN post_categories pc ON pc.post_id = p.id
    LEFT JOIN categories c ON c.id = pc.category_id
    {filter}
    GROUP BY p.id
    ORDER BY p.created_at DESC, p.seq ASC
"#;

fn listing_filter(listing: &PostListing) -> &'static str {
    match listing {
        PostListing::All => "",
        // Filter through a separate join so the full category list survives
        PostListing::InCategories(_) => {
            r#"WHERE EXISTS (
                SELECT 1
                FROM post_categories fpc
                JOIN categories fc ON fc.id = fpc.category_id
                WHERE fpc.post_id = p.id AND fc.name = ANY($1)
            )"#
        }
        PostListing::AuthoredBy(_) => "WHERE p.author_id = $1",
        PostListing::LikedBy(_) => {
            r#"WHERE EXISTS (
                SELECT 1
                FROM reactions r
                WHERE r.post_id = p.id AND r.user_id = $1 AND r.is_like
            )"#
        }
    }
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<CategorizedPost>> {
        let sql = POST_SELECT.replace("{filter}", "WHERE p.id = $1");

        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(CategorizedPost::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list(&self, listing: &PostListing) -> RepoResult<Vec<CategorizedPost>> {
        let sql = POST_SELECT.replace("{filter}", listing_filter(listing));

        let query = sqlx::query_as::<_, PostModel>(&sql);
        let query = match listing {
            PostListing::All => query,
            PostListing::InCategories(names) => {
                let names: Vec<String> = names.iter().map(|n| n.as_str().to_owned()).collect();
                query.bind(names)
            }
            PostListing::AuthoredBy(user_id) | PostListing::LikedBy(user_id) => {
                query.bind(user_id.into_inner())
            }
        };

        let results = query.fetch_all(&self.pool).await.map_err(map_db_error)?;
        debug!(count = results.len(), "Listed posts");

        Ok(results.into_iter().map(CategorizedPost::from).collect())
    }

    #[instrument(skip(self, new_post), fields(post_id = %new_post.post.id))]
    async fn create(&self, new_post: &NewPost) -> RepoResult<()> {
        let insert = PostInsert::new(&new_post.post);
        let names: Vec<String> = new_post
            .categories
            .iter()
            .map(|n| n.as_str().to_owned())
            .collect();

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, title, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.title)
        .bind(insert.content)
        .bind(new_post.post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Insert-if-absent, then link whatever rows now carry those names
        sqlx::query(
            r#"
            INSERT INTO categories (name)
            SELECT unnest($1::text[])
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&names)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO post_categories (post_id, category_id)
            SELECT $1, id FROM categories WHERE name = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(insert.id)
        .bind(&names)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

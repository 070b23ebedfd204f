use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::repository::{PostRepository, Repository, require_id};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::resource::not_found;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, post: Post) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (blog, title, author, content, image_url, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, blog, title, author, content, image_url, tags, created_at, updated_at
            "#,
        )
        .bind(post.blog)
        .bind(post.title)
        .bind(post.author)
        .bind(post.content)
        .bind(post.image_url)
        .bind(post.tags)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, post: Post) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2,
                author = $3,
                content = $4,
                image_url = $5,
                tags = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, blog, title, author, content, image_url, tags, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(post.title)
        .bind(post.author)
        .bind(post.content)
        .bind(post.image_url)
        .bind(post.tags)
        .bind(post.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(Post::from).ok_or_else(|| not_found::<Post>(id))
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    blog: String,
    title: String,
    author: String,
    content: String,
    image_url: Option<String>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: Some(row.id),
            blog: row.blog,
            title: row.title,
            author: row.author,
            content: row.content,
            image_url: row.image_url,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl Repository<Post> for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, blog, title, author, content, image_url, tags, created_at, updated_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, blog, title, author, content, image_url, tags, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn save(&self, entity: Post) -> Result<Post, DomainError> {
        match entity.id {
            Some(id) => self.update(id, entity).await,
            None => self.insert(entity).await,
        }
    }

    async fn delete(&self, entity: Post) -> Result<(), DomainError> {
        let id = require_id(&entity)?;
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_blog(&self, blog: &str) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, blog, title, author, content, image_url, tags, created_at, updated_at
            FROM posts
            WHERE blog = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(blog)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn all_tags(&self, blog: &str) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT tag
            FROM posts, unnest(posts.tags) AS tag
            WHERE posts.blog = $1
            ORDER BY tag
            "#,
        )
        .bind(blog)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

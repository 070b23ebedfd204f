use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::repository::{CommentRepository, Repository, require_id};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::resource::not_found;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, DomainError> {
        let post_id = comment.post_id;
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, content, author, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, content, author, created_at, modified_at
            "#,
        )
        .bind(comment.post_id)
        .bind(comment.content)
        .bind(comment.author)
        .bind(comment.created_at)
        .bind(comment.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_comment_db_error(err, post_id))?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, comment: Comment) -> Result<Comment, DomainError> {
        let post_id = comment.post_id;
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET post_id = $2,
                content = $3,
                author = $4,
                created_at = $5,
                modified_at = $6
            WHERE id = $1
            RETURNING id, post_id, content, author, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(comment.post_id)
        .bind(comment.content)
        .bind(comment.author)
        .bind(comment.created_at)
        .bind(comment.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_comment_db_error(err, post_id))?;

        row.map(Comment::from)
            .ok_or_else(|| not_found::<Comment>(id))
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    content: String,
    author: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: Some(row.id),
            post_id: row.post_id,
            content: row.content,
            author: row.author,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[async_trait]
impl Repository<Comment> for PostgresCommentRepository {
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, content, author, created_at, modified_at
            FROM comments
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, content, author, created_at, modified_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(row.map(Comment::from))
    }

    async fn save(&self, entity: Comment) -> Result<Comment, DomainError> {
        match entity.id {
            Some(id) => self.update(id, entity).await,
            None => self.insert(entity).await,
        }
    }

    async fn delete(&self, entity: Comment) -> Result<(), DomainError> {
        let id = require_id(&entity)?;
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, content, author, created_at, modified_at
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

fn map_comment_db_error(err: sqlx::Error, post_id: i64) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return not_found::<Post>(post_id);
    }
    DomainError::Unexpected(err.to_string())
}

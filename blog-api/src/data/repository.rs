use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::resource::Entity;

/// CRUD access to one entity table keyed by numeric id.
#[async_trait]
pub(crate) trait Repository<E: Entity>: Send + Sync {
    /// All rows in ascending id order.
    async fn find_all(&self) -> Result<Vec<E>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, DomainError>;
    /// Inserts when `entity.id()` is `None`, updates the existing row otherwise.
    async fn save(&self, entity: E) -> Result<E, DomainError>;
    async fn delete(&self, entity: E) -> Result<(), DomainError>;
}

#[async_trait]
pub(crate) trait CommentRepository: Repository<Comment> {
    async fn find_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
}

#[async_trait]
pub(crate) trait PostRepository: Repository<Post> {
    /// Posts of one blog, newest first.
    async fn find_by_blog(&self, blog: &str) -> Result<Vec<Post>, DomainError>;
    /// Distinct tags used by the posts of one blog, sorted.
    async fn all_tags(&self, blog: &str) -> Result<Vec<String>, DomainError>;
}

pub(crate) fn require_id<E: Entity>(entity: &E) -> Result<i64, DomainError> {
    entity.id().ok_or(DomainError::Validation {
        field: "id",
        message: "must be set",
    })
}

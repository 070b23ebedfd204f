use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::data::repository::Repository;
use crate::domain::error::DomainError;
use crate::domain::resource::{Dto, Entity, not_found};

/// CRUD over one resource: converts between `D` and its entity and
/// delegates persistence to `R`.
pub(crate) struct CrudService<D, R: ?Sized> {
    repo: Arc<R>,
    _dto: PhantomData<fn() -> D>,
}

impl<D, R> CrudService<D, R>
where
    D: Dto,
    R: Repository<D::Entity> + ?Sized,
{
    pub(crate) fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            _dto: PhantomData,
        }
    }

    pub(crate) async fn get_all(&self) -> Result<Vec<D>, DomainError> {
        let entities = self.repo.find_all().await?;
        Ok(entities.into_iter().map(D::from_entity).collect())
    }

    pub(crate) async fn get_by_id(&self, id: i64) -> Result<Option<D>, DomainError> {
        Ok(self.repo.find_by_id(id).await?.map(D::from_entity))
    }

    pub(crate) async fn create(&self, dto: D) -> Result<D, DomainError> {
        let mut entity = dto.into_entity(Utc::now())?;
        entity.set_id(None);

        let saved = self.repo.save(entity).await?;
        info!(kind = Self::kind(), id = ?saved.id(), "created");
        Ok(D::from_entity(saved))
    }

    pub(crate) async fn update(&self, id: i64, dto: D) -> Result<D, DomainError> {
        let mut entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<D::Entity>(id))?;
        dto.apply_to(&mut entity, Utc::now())?;

        let saved = self.repo.save(entity).await?;
        info!(kind = Self::kind(), id, "updated");
        Ok(D::from_entity(saved))
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let entity = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found::<D::Entity>(id))?;

        self.repo.delete(entity).await?;
        info!(kind = Self::kind(), id, "deleted");
        Ok(())
    }

    fn kind() -> &'static str {
        <D::Entity as Entity>::KIND
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::CrudService;
    use crate::data::repository::Repository;
    use crate::domain::comment::{Comment, CommentDto};
    use crate::domain::error::DomainError;

    #[derive(Clone)]
    struct FakeCommentRepo {
        saved_input: Arc<Mutex<Option<Comment>>>,
        comment_for_get: Arc<Mutex<Option<Comment>>>,
        deleted: Arc<Mutex<Option<Comment>>>,
    }

    impl FakeCommentRepo {
        fn new() -> Self {
            Self {
                saved_input: Arc::new(Mutex::new(None)),
                comment_for_get: Arc::new(Mutex::new(None)),
                deleted: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl Repository<Comment> for FakeCommentRepo {
        async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
            Ok(self
                .comment_for_get
                .lock()
                .expect("comment_for_get mutex poisoned")
                .clone()
                .into_iter()
                .collect())
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<Comment>, DomainError> {
            Ok(self
                .comment_for_get
                .lock()
                .expect("comment_for_get mutex poisoned")
                .clone())
        }

        async fn save(&self, entity: Comment) -> Result<Comment, DomainError> {
            *self.saved_input.lock().expect("saved_input mutex poisoned") = Some(entity.clone());
            let mut saved = entity;
            saved.id.get_or_insert(11);
            Ok(saved)
        }

        async fn delete(&self, entity: Comment) -> Result<(), DomainError> {
            *self.deleted.lock().expect("deleted mutex poisoned") = Some(entity);
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_ignores_incoming_id() {
        let repo = FakeCommentRepo::new();
        let service = CrudService::<CommentDto, _>::new(Arc::new(repo.clone()));

        let created = service
            .create(sample_dto(Some(999)))
            .await
            .expect("create must succeed");

        let input = repo
            .saved_input
            .lock()
            .expect("saved_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.id, None);
        assert_eq!(created.id, Some(11));
        assert_eq!(created.content, "hi");
    }

    #[tokio::test]
    async fn update_returns_not_found_when_missing() {
        let service = CrudService::<CommentDto, _>::new(Arc::new(FakeCommentRepo::new()));

        let err = service
            .update(5, sample_dto(None))
            .await
            .expect_err("comment must be missing");
        match err {
            DomainError::NotFound(msg) => assert_eq!(msg, "comment id: 5"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_returns_not_found_when_missing() {
        let repo = FakeCommentRepo::new();
        let service = CrudService::<CommentDto, _>::new(Arc::new(repo.clone()));

        let err = service.delete(5).await.expect_err("comment must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(repo.deleted.lock().expect("deleted mutex poisoned").is_none());
    }

    #[tokio::test]
    async fn delete_passes_found_entity_to_repo() {
        let repo = FakeCommentRepo::new();
        *repo
            .comment_for_get
            .lock()
            .expect("comment_for_get mutex poisoned") = Some(sample_comment(5));
        let service = CrudService::<CommentDto, _>::new(Arc::new(repo.clone()));

        service.delete(5).await.expect("delete must succeed");

        let deleted = repo
            .deleted
            .lock()
            .expect("deleted mutex poisoned")
            .clone()
            .expect("delete call must be captured");
        assert_eq!(deleted.id, Some(5));
    }

    fn sample_dto(id: Option<i64>) -> CommentDto {
        CommentDto {
            id,
            post_id: Some(1),
            content: "hi".to_string(),
            author: "A".to_string(),
            created_at: None,
            modified_at: None,
        }
    }

    fn sample_comment(id: i64) -> Comment {
        let now = Utc::now();
        Comment {
            id: Some(id),
            post_id: 1,
            content: "hi".to_string(),
            author: "A".to_string(),
            created_at: now,
            modified_at: now,
        }
    }
}

use std::sync::Arc;

use crate::application::crud_service::CrudService;
use crate::data::repository::{CommentRepository, PostRepository};
use crate::domain::comment::CommentDto;
use crate::domain::error::DomainError;
use crate::domain::resource::Dto;

pub(crate) struct CommentService<C: ?Sized, P: ?Sized> {
    crud: CrudService<CommentDto, C>,
    comments: Arc<C>,
    posts: Arc<P>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub(crate) fn new(comments: Arc<C>, posts: Arc<P>) -> Self {
        Self {
            crud: CrudService::new(comments.clone()),
            comments,
            posts,
        }
    }

    pub(crate) async fn get_all_comments(&self) -> Result<Vec<CommentDto>, DomainError> {
        self.crud.get_all().await
    }

    pub(crate) async fn get_comment_by_id(
        &self,
        id: i64,
    ) -> Result<Option<CommentDto>, DomainError> {
        self.crud.get_by_id(id).await
    }

    pub(crate) async fn create_comment(&self, dto: CommentDto) -> Result<CommentDto, DomainError> {
        self.crud.create(dto).await
    }

    pub(crate) async fn update_comment(
        &self,
        id: i64,
        dto: CommentDto,
    ) -> Result<CommentDto, DomainError> {
        self.crud.update(id, dto).await
    }

    pub(crate) async fn delete_comment(&self, id: i64) -> Result<(), DomainError> {
        self.crud.delete(id).await
    }

    /// Comments of one post in id order. An unknown post is an invalid argument
    /// rather than a miss.
    pub(crate) async fn comments_by_post_id(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentDto>, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::InvalidArgument(format!(
                "invalid post id: {post_id}"
            )));
        }

        let comments = self.comments.find_by_post_id(post_id).await?;
        Ok(comments.into_iter().map(CommentDto::from_entity).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::CommentService;
    use crate::application::crud_service::CrudService;
    use crate::data::repositories::memory::{
        MemoryCommentRepository, MemoryPostRepository, MemoryStore,
    };
    use crate::domain::comment::CommentDto;
    use crate::domain::error::DomainError;
    use crate::domain::post::PostDto;

    type Service = CommentService<MemoryCommentRepository, MemoryPostRepository>;

    fn setup() -> (Service, CrudService<PostDto, MemoryPostRepository>) {
        let store = MemoryStore::new();
        let posts = Arc::new(store.posts());
        let comments = Service::new(Arc::new(store.comments()), posts.clone());
        (comments, CrudService::new(posts))
    }

    async fn create_post(posts: &CrudService<PostDto, MemoryPostRepository>, title: &str) -> i64 {
        posts
            .create(PostDto {
                blog: "jh".to_string(),
                title: title.to_string(),
                author: "author".to_string(),
                content: "content".to_string(),
                ..PostDto::default()
            })
            .await
            .expect("post must be created")
            .id
            .expect("post id must be assigned")
    }

    fn comment(post_id: i64, content: &str, author: &str) -> CommentDto {
        CommentDto {
            post_id: Some(post_id),
            content: content.to_string(),
            author: author.to_string(),
            ..CommentDto::default()
        }
    }

    #[tokio::test]
    async fn created_comment_is_readable_by_returned_id() {
        let (service, posts) = setup();
        let post_id = create_post(&posts, "T").await;

        let created = service
            .create_comment(comment(post_id, "hi", "A"))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id must be populated");

        let fetched = service
            .get_comment_by_id(id)
            .await
            .expect("lookup must succeed")
            .expect("comment must exist");
        assert_eq!(fetched, created);
        assert_eq!(fetched.content, "hi");
        assert_eq!(fetched.author, "A");
        assert_eq!(fetched.post_id, Some(post_id));
    }

    #[tokio::test]
    async fn create_for_unknown_post_is_not_found() {
        let (service, _posts) = setup();

        let err = service
            .create_comment(comment(404, "hi", "A"))
            .await
            .expect_err("post does not exist");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_missing_comment_is_not_found() {
        let (service, _posts) = setup();

        let err = service
            .update_comment(1, comment(1, "x", "y"))
            .await
            .expect_err("comment does not exist");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_identity() {
        let (service, posts) = setup();
        let post_id = create_post(&posts, "T").await;
        let other_post_id = create_post(&posts, "other").await;
        let created = service
            .create_comment(comment(post_id, "hi", "A"))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id");

        let created_at = Utc.with_ymd_and_hms(2023, 3, 1, 9, 0, 0).unwrap();
        let modified_at = created_at + Duration::hours(2);
        let updated = service
            .update_comment(
                id,
                CommentDto {
                    id: None,
                    post_id: Some(other_post_id),
                    content: "edited".to_string(),
                    author: "B".to_string(),
                    created_at: Some(created_at),
                    modified_at: Some(modified_at),
                },
            )
            .await
            .expect("update must succeed");

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.post_id, Some(post_id));
        assert_eq!(updated.content, "edited");
        assert_eq!(updated.author, "B");
        assert_eq!(updated.created_at, Some(created_at));
        assert_eq!(updated.modified_at, Some(modified_at));
    }

    #[tokio::test]
    async fn deleted_comment_is_gone() {
        let (service, posts) = setup();
        let post_id = create_post(&posts, "T").await;
        let id = service
            .create_comment(comment(post_id, "hi", "A"))
            .await
            .expect("create must succeed")
            .id
            .expect("id");

        service.delete_comment(id).await.expect("delete must succeed");

        assert!(
            service
                .get_comment_by_id(id)
                .await
                .expect("lookup must succeed")
                .is_none()
        );
        let err = service
            .delete_comment(id)
            .await
            .expect_err("second delete must miss");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn comments_by_post_id_rejects_unknown_post() {
        let (service, _posts) = setup();

        let err = service
            .comments_by_post_id(9)
            .await
            .expect_err("post does not exist");
        match err {
            DomainError::InvalidArgument(msg) => assert_eq!(msg, "invalid post id: 9"),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_all_comments_keeps_store_order() {
        let (service, posts) = setup();
        let post_id = create_post(&posts, "T").await;
        for content in ["first", "second", "third"] {
            service
                .create_comment(comment(post_id, content, "A"))
                .await
                .expect("create must succeed");
        }

        let contents: Vec<_> = service
            .get_all_comments()
            .await
            .expect("list must succeed")
            .into_iter()
            .map(|dto| dto.content)
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn post_comment_listing_follows_create_and_delete() {
        let (service, posts) = setup();
        let post_id = create_post(&posts, "T").await;

        assert!(
            service
                .comments_by_post_id(post_id)
                .await
                .expect("listing must succeed")
                .is_empty()
        );

        let created = service
            .create_comment(comment(post_id, "hi", "A"))
            .await
            .expect("create must succeed");
        let id = created.id.expect("id");

        let listed = service
            .comments_by_post_id(post_id)
            .await
            .expect("listing must succeed");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(id));
        assert_eq!(listed[0].content, "hi");
        assert_eq!(listed[0].author, "A");

        service.delete_comment(id).await.expect("delete must succeed");
        assert!(
            service
                .comments_by_post_id(post_id)
                .await
                .expect("listing must succeed")
                .is_empty()
        );
    }
}

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::blog_service::BlogService;
use crate::application::comment_service::CommentService;
use crate::application::crud_service::CrudService;
use crate::data::repositories::memory::MemoryStore;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repository::{CommentRepository, PostRepository};
use crate::domain::post::PostDto;

pub(crate) mod http;

pub(crate) type SharedCommentService = CommentService<dyn CommentRepository, dyn PostRepository>;
pub(crate) type SharedPostService = CrudService<PostDto, dyn PostRepository>;
pub(crate) type SharedBlogService = BlogService<dyn PostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) comment_service: Arc<SharedCommentService>,
    pub(crate) post_service: Arc<SharedPostService>,
    pub(crate) blog_service: Arc<SharedBlogService>,
}

impl AppState {
    pub(crate) fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            comment_service: Arc::new(CommentService::new(comments, posts.clone())),
            post_service: Arc::new(CrudService::new(posts.clone())),
            blog_service: Arc::new(BlogService::new(posts)),
        }
    }

    pub(crate) fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresCommentRepository::new(pool.clone())),
            Arc::new(PostgresPostRepository::new(pool)),
        )
    }

    pub(crate) fn in_memory(store: &MemoryStore) -> Self {
        Self::new(Arc::new(store.comments()), Arc::new(store.posts()))
    }
}

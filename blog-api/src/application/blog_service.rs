use std::sync::Arc;

use crate::data::repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::PostDto;
use crate::domain::resource::Dto;

/// Listing data of one author's blog.
#[derive(Debug, Clone)]
pub(crate) struct BlogPage {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) tags: Vec<String>,
}

pub(crate) struct BlogService<P: ?Sized> {
    posts: Arc<P>,
}

impl<P: PostRepository + ?Sized> BlogService<P> {
    pub(crate) fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub(crate) async fn blog_page(&self, blog: &str) -> Result<BlogPage, DomainError> {
        let posts = self.posts.find_by_blog(blog).await?;
        let tags = self.posts.all_tags(blog).await?;

        Ok(BlogPage {
            posts: posts.into_iter().map(PostDto::from_entity).collect(),
            tags,
        })
    }

    /// Every post of every blog for the landing page.
    pub(crate) async fn index(&self) -> Result<Vec<PostDto>, DomainError> {
        let posts = self.posts.find_all().await?;
        Ok(posts.into_iter().map(PostDto::from_entity).collect())
    }
}

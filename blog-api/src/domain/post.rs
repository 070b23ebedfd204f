use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error::DomainError;
use super::resource::{Dto, Entity};

/// Post row as stored in the `posts` table.
///
/// `blog` is the slug of the author's blog the post is published in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Post {
    pub(crate) id: Option<i64>,
    pub(crate) blog: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) image_url: Option<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Entity for Post {
    const KIND: &'static str = "post";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Option<i64>,
    /// Blog the post is published in. Checked on create, ignored on update.
    #[serde(default)]
    pub(crate) blog: String,
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 100))]
    pub(crate) author: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(max = 2048))]
    pub(crate) image_url: Option<String>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

impl Dto for PostDto {
    type Entity = Post;

    fn from_entity(entity: Post) -> Self {
        Self {
            id: entity.id,
            blog: entity.blog,
            title: entity.title,
            author: entity.author,
            content: entity.content,
            image_url: entity.image_url,
            tags: entity.tags,
            created_at: Some(entity.created_at),
            updated_at: Some(entity.updated_at),
        }
    }

    fn into_entity(self, now: DateTime<Utc>) -> Result<Post, DomainError> {
        let created_at = self.created_at.unwrap_or(now);
        let updated_at = self.updated_at.unwrap_or(now);
        check_timestamp_order(created_at, updated_at)?;

        Ok(Post {
            id: self.id,
            blog: normalize_blog(&self.blog)?,
            title: normalize_title(&self.title)?,
            author: self.author,
            content: self.content,
            image_url: self.image_url,
            tags: normalize_tags(self.tags),
            created_at,
            updated_at,
        })
    }

    fn apply_to(self, entity: &mut Post, now: DateTime<Utc>) -> Result<(), DomainError> {
        let title = normalize_title(&self.title)?;
        let updated_at = self.updated_at.unwrap_or(now);
        check_timestamp_order(entity.created_at, updated_at)?;

        entity.title = title;
        entity.author = self.author;
        entity.content = self.content;
        entity.image_url = self.image_url;
        entity.tags = normalize_tags(self.tags);
        entity.updated_at = updated_at;
        Ok(())
    }
}

fn check_timestamp_order(
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<(), DomainError> {
    if updated_at < created_at {
        return Err(DomainError::Validation {
            field: "updated_at",
            message: "must be >= created_at",
        });
    }
    Ok(())
}

fn normalize_blog(blog: &str) -> Result<String, DomainError> {
    let blog = blog.trim();
    let valid_chars = blog
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if blog.is_empty() || blog.len() > 64 || !valid_chars {
        return Err(DomainError::Validation {
            field: "blog",
            message: "must be a slug of 1..64 chars from [A-Za-z0-9_-]",
        });
    }
    Ok(blog.to_string())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(title.to_string())
}

/// Trims tags, drops empty ones and repeated ones keeping the first occurrence.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|seen| seen == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::error::DomainError;
use super::resource::{Dto, Entity, validate_positive_i64};

/// Comment row as stored in the `comments` table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Comment {
    pub(crate) id: Option<i64>,
    pub(crate) post_id: i64,
    pub(crate) content: String,
    pub(crate) author: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) modified_at: DateTime<Utc>,
}

impl Entity for Comment {
    const KIND: &'static str = "comment";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: Option<i64>,
    /// Owning post. Required on create, ignored on update.
    pub(crate) post_id: Option<i64>,
    #[validate(length(min = 1, max = 2000))]
    pub(crate) content: String,
    #[validate(length(min = 1, max = 100))]
    pub(crate) author: String,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) modified_at: Option<DateTime<Utc>>,
}

impl Dto for CommentDto {
    type Entity = Comment;

    fn from_entity(entity: Comment) -> Self {
        Self {
            id: entity.id,
            post_id: Some(entity.post_id),
            content: entity.content,
            author: entity.author,
            created_at: Some(entity.created_at),
            modified_at: Some(entity.modified_at),
        }
    }

    fn into_entity(self, now: DateTime<Utc>) -> Result<Comment, DomainError> {
        let post_id = self.post_id.ok_or(DomainError::Validation {
            field: "post_id",
            message: "must be set",
        })?;
        validate_positive_i64("post_id", post_id)?;

        Ok(Comment {
            id: self.id,
            post_id,
            content: self.content,
            author: self.author,
            created_at: self.created_at.unwrap_or(now),
            modified_at: self.modified_at.unwrap_or(now),
        })
    }

    fn apply_to(self, entity: &mut Comment, now: DateTime<Utc>) -> Result<(), DomainError> {
        entity.content = self.content;
        entity.author = self.author;
        if let Some(created_at) = self.created_at {
            entity.created_at = created_at;
        }
        entity.modified_at = self.modified_at.unwrap_or(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{Comment, CommentDto};
    use crate::domain::error::DomainError;
    use crate::domain::resource::Dto;

    #[test]
    fn dto_entity_dto_keeps_every_mapped_field() {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let dto = CommentDto {
            id: Some(3),
            post_id: Some(1),
            content: "  hi  ".to_string(),
            author: "A".to_string(),
            created_at: Some(created_at),
            modified_at: Some(created_at + Duration::minutes(5)),
        };

        let entity = dto
            .clone()
            .into_entity(Utc::now())
            .expect("complete dto must convert");
        assert_eq!(CommentDto::from_entity(entity), dto);
    }

    #[test]
    fn into_entity_stamps_missing_timestamps() {
        let now = Utc::now();
        let dto = CommentDto {
            post_id: Some(1),
            content: "hi".to_string(),
            author: "A".to_string(),
            ..CommentDto::default()
        };

        let entity = dto.into_entity(now).expect("must convert");
        assert_eq!(entity.id, None);
        assert_eq!(entity.created_at, now);
        assert_eq!(entity.modified_at, now);
    }

    #[test]
    fn into_entity_requires_post_id() {
        let dto = CommentDto {
            content: "hi".to_string(),
            author: "A".to_string(),
            ..CommentDto::default()
        };

        let err = dto.into_entity(Utc::now()).expect_err("post_id is required");
        assert_validation_field(err, "post_id");
    }

    #[test]
    fn into_entity_rejects_non_positive_post_id() {
        let dto = CommentDto {
            post_id: Some(0),
            content: "hi".to_string(),
            author: "A".to_string(),
            ..CommentDto::default()
        };

        let err = dto.into_entity(Utc::now()).expect_err("post_id must be > 0");
        assert_validation_field(err, "post_id");
    }

    #[test]
    fn apply_to_overwrites_fields_but_keeps_owner() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut entity = Comment {
            id: Some(9),
            post_id: 4,
            content: "old".to_string(),
            author: "old author".to_string(),
            created_at,
            modified_at: created_at,
        };
        let now = created_at + Duration::days(1);

        CommentDto {
            id: Some(100),
            post_id: Some(77),
            content: "new".to_string(),
            author: "B".to_string(),
            created_at: None,
            modified_at: None,
        }
        .apply_to(&mut entity, now)
        .expect("update must apply");

        assert_eq!(entity.id, Some(9));
        assert_eq!(entity.post_id, 4);
        assert_eq!(entity.content, "new");
        assert_eq!(entity.author, "B");
        assert_eq!(entity.created_at, created_at);
        assert_eq!(entity.modified_at, now);
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}

use chrono::{DateTime, Utc};

use super::error::DomainError;

/// A persisted row keyed by a store-assigned numeric id.
///
/// `id` is `None` until the row has been saved once. Repositories insert
/// entities without an id and update the ones that carry it.
pub(crate) trait Entity: Clone + Send + Sync + 'static {
    /// Resource name used in lookup errors, e.g. `comment id: 7`.
    const KIND: &'static str;

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: Option<i64>);
}

/// Transport representation of an [`Entity`].
pub(crate) trait Dto: Sized + Send + Sync + 'static {
    type Entity: Entity;

    fn from_entity(entity: Self::Entity) -> Self;

    /// Builds the entity, stamping `now` into timestamps the DTO leaves empty.
    fn into_entity(self, now: DateTime<Utc>) -> Result<Self::Entity, DomainError>;

    /// Overwrites the mutable fields of `entity`. Identity and ownership stay.
    /// Runs the same checks as [`Dto::into_entity`] on the fields it writes.
    fn apply_to(self, entity: &mut Self::Entity, now: DateTime<Utc>) -> Result<(), DomainError>;
}

pub(crate) fn not_found<E: Entity>(id: i64) -> DomainError {
    DomainError::NotFound(format!("{} id: {id}", E::KIND))
}

pub(crate) fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

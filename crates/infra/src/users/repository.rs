use std::sync::Arc;

use roster_core::{PageList, UserDraft, UserEntity, UserId};

/// Result of [`UserRepository::update_or_insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No user had the id; the entity was stored under it.
    Inserted,
    /// An existing user was overwritten in place.
    Updated,
}

impl UpsertOutcome {
    pub fn was_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Canonical owner of user records.
///
/// None of these operations fail: a miss is reported through `Option`/`bool`
/// and the handler decides what that means for the caller.
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: UserId) -> Option<UserEntity>;

    /// Store `draft` under a freshly generated id.
    fn insert(&self, draft: UserDraft) -> UserEntity;

    /// Overwrite the user with `entity.id`, or store `entity` as-is when that
    /// id is unknown. The caller controls the id on this path.
    fn update_or_insert(&self, entity: UserEntity) -> (UserEntity, UpsertOutcome);

    /// Remove the user if present. Returns whether anything was removed.
    fn delete(&self, id: UserId) -> bool;

    /// Page `page_number` (1-based) in insertion order.
    ///
    /// Arguments below 1 are treated as 1.
    fn get_page(&self, page_number: u32, page_size: u32) -> PageList<UserEntity>;

    fn count(&self) -> usize;
}

impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    fn find_by_id(&self, id: UserId) -> Option<UserEntity> {
        (**self).find_by_id(id)
    }

    fn insert(&self, draft: UserDraft) -> UserEntity {
        (**self).insert(draft)
    }

    fn update_or_insert(&self, entity: UserEntity) -> (UserEntity, UpsertOutcome) {
        (**self).update_or_insert(entity)
    }

    fn delete(&self, id: UserId) -> bool {
        (**self).delete(id)
    }

    fn get_page(&self, page_number: u32, page_size: u32) -> PageList<UserEntity> {
        (**self).get_page(page_number, page_size)
    }

    fn count(&self) -> usize {
        (**self).count()
    }
}

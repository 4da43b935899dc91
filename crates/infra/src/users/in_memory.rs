use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use roster_core::{PageList, UserDraft, UserEntity, UserId};

use super::repository::{UpsertOutcome, UserRepository};

/// Process-local user store.
///
/// A single `RwLock` guards the whole map, so id allocation and the
/// existence check on upsert are atomic with the write that follows.
/// `IndexMap` keeps insertion order for paging; removals use `shift_remove`
/// to preserve it.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<IndexMap<UserId, UserEntity>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation leaves the map consistent, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, IndexMap<UserId, UserEntity>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<UserId, UserEntity>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: UserId) -> Option<UserEntity> {
        self.read().get(&id).cloned()
    }

    fn insert(&self, draft: UserDraft) -> UserEntity {
        let mut users = self.write();

        let mut id = UserId::new();
        while users.contains_key(&id) {
            id = UserId::new();
        }

        let entity = UserEntity::from_draft(id, draft);
        users.insert(id, entity.clone());
        tracing::debug!(user_id = %id, total = users.len(), "user inserted");
        entity
    }

    fn update_or_insert(&self, entity: UserEntity) -> (UserEntity, UpsertOutcome) {
        let mut users = self.write();

        if let Some(stored) = users.get_mut(&entity.id) {
            stored.overwrite_from(entity);
            tracing::debug!(user_id = %stored.id, "user updated");
            return (stored.clone(), UpsertOutcome::Updated);
        }

        let id = entity.id;
        users.insert(id, entity.clone());
        tracing::debug!(user_id = %id, total = users.len(), "user inserted under caller id");
        (entity, UpsertOutcome::Inserted)
    }

    fn delete(&self, id: UserId) -> bool {
        let removed = self.write().shift_remove(&id).is_some();
        if removed {
            tracing::debug!(user_id = %id, "user deleted");
        }
        removed
    }

    fn get_page(&self, page_number: u32, page_size: u32) -> PageList<UserEntity> {
        let users = self.read();
        PageList::slice(users.values(), users.len() as u64, page_number, page_size)
    }

    fn count(&self) -> usize {
        self.read().len()
    }
}

//! The record store.
//!
//! Handlers only see [`UserStore`]; [`MemoryStore`] is the in-process
//! implementation the binary uses. Each method is one critical section, so a
//! find-then-mutate can never interleave with another request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{User, UserPatch};

/// Shared handle injected into the handlers.
pub type SharedStore = Arc<dyn UserStore>;

/// An ordered collection of user records addressed by id.
///
/// Lookups by id act on the *first* record with that id; ids are not checked
/// for uniqueness on [`append`](UserStore::append).
pub trait UserStore: Send + Sync + 'static {
    /// A copy of every record in store order.
    fn list(&self) -> Vec<User>;

    fn find(&self, id: i64) -> Option<User>;

    /// Adds `user` at the end, even when its id is already taken.
    fn append(&self, user: User);

    /// Replaces the record with `id`, keeping `id`. Returns the stored record.
    fn replace(&self, id: i64, user: User) -> Option<User>;

    /// Shallow-merges `patch` into the record with `id`. Returns the result.
    fn merge(&self, id: i64, patch: UserPatch) -> Option<User>;

    /// Removes the record with `id` and returns it.
    fn remove(&self, id: i64) -> Option<User>;
}

/// A [`UserStore`] over a mutex-guarded `Vec`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    pub fn new(users: Vec<User>) -> Self {
        Self { users: Mutex::new(users) }
    }

    /// A store holding the five seed records.
    pub fn seeded() -> Self {
        Self::new(super::seed())
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(self)
    }

    // Every mutation is a single assignment or removal, so a poisoned lock
    // still guards a consistent Vec.
    fn lock(&self) -> MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserStore for MemoryStore {
    fn list(&self) -> Vec<User> {
        self.lock().clone()
    }

    fn find(&self, id: i64) -> Option<User> {
        self.lock().iter().find(|u| u.id == id).cloned()
    }

    fn append(&self, user: User) {
        self.lock().push(user);
    }

    fn replace(&self, id: i64, mut user: User) -> Option<User> {
        let mut users = self.lock();
        let slot = users.iter_mut().find(|u| u.id == id)?;
        user.id = id;
        *slot = user;
        Some(slot.clone())
    }

    fn merge(&self, id: i64, patch: UserPatch) -> Option<User> {
        let mut users = self.lock();
        let slot = users.iter_mut().find(|u| u.id == id)?;
        slot.apply(patch);
        Some(slot.clone())
    }

    fn remove(&self, id: i64) -> Option<User> {
        let mut users = self.lock();
        let index = users.iter().position(|u| u.id == id)?;
        Some(users.remove(index))
    }
}

use std::marker::PhantomData;

use crate::traits::Entity;

/// Stateless CRUD facade for one entity type.
///
/// A repository carries no connection state; it is intended to be created
/// once per entity type and reused, with each call receiving the caller's
/// [`Session`](crate::session::Session). Sharing one instance across threads
/// is safe as long as each caller brings its own session.
#[derive(Clone)]
pub struct Repository<T: Entity> {
    _phantom: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("entity", &T::entity_name())
            .field("table", &T::table_name())
            .finish()
    }
}

/// Factory: a configured repository for an entity type
pub fn repository_for<T: Entity>() -> Repository<T> {
    Repository::new()
}

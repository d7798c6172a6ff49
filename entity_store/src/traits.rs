//! Trait definitions
//!
//! This module defines the entity descriptor and the repository operation
//! surface.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

use crate::errors::StoreError;
use crate::fields::{Fields, Page};
use crate::session::Session;

/// Compile-time descriptor for a persisted entity type.
///
/// The column registry is the single source of truth for which filter and
/// update keys are recognized; keys outside `columns()` are ignored by
/// repository reads and updates. An entity opts into the soft-delete
/// convention by reporting its boolean active column (`ativo` in the shared
/// models); entities without one are always visible and cannot be deleted
/// through the repository.
///
/// ```
/// use entity_store::Entity;
///
/// #[derive(Debug, Clone, sqlx::FromRow)]
/// pub struct Usuario {
///     pub id: i32,
///     pub nome: String,
///     pub ativo: bool,
/// }
///
/// impl Entity for Usuario {
///     type Id = i32;
///
///     fn entity_name() -> &'static str {
///         "Usuario"
///     }
///
///     fn table_name() -> &'static str {
///         "usuarios"
///     }
///
///     fn columns() -> &'static [&'static str] {
///         &["id", "nome", "ativo"]
///     }
///
///     fn schema() -> &'static [(&'static str, &'static str)] {
///         &[
///             ("id", "SERIAL PRIMARY KEY"),
///             ("nome", "TEXT NOT NULL"),
///             ("ativo", "BOOLEAN NOT NULL DEFAULT TRUE"),
///         ]
///     }
///
///     fn active_column() -> Option<&'static str> {
///         Some("ativo")
///     }
///
///     fn id(&self) -> i32 {
///         self.id
///     }
/// }
/// ```
pub trait Entity:
    Clone + Send + Sync + Unpin + Debug + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>
{
    /// The primary key type (i32, i64, Uuid, String, ...)
    type Id: Clone
        + Send
        + Sync
        + Unpin
        + Debug
        + Display
        + PartialEq
        + for<'q> sqlx::Encode<'q, sqlx::Postgres>
        + sqlx::Type<sqlx::Postgres>;

    /// Entity name carried in error context
    fn entity_name() -> &'static str;

    /// The table name in the database
    fn table_name() -> &'static str;

    /// Every persisted column name
    fn columns() -> &'static [&'static str];

    /// Column name and PostgreSQL type pairs, used for table creation
    fn schema() -> &'static [(&'static str, &'static str)];

    /// The primary key column name
    fn id_column() -> &'static str {
        "id"
    }

    /// The boolean column governing visibility and soft delete, if any
    fn active_column() -> Option<&'static str> {
        None
    }

    /// Extract the id from an entity instance
    fn id(&self) -> Self::Id;
}

/// Trait that defines the uniform persistence operations for all entities.
///
/// Every operation takes the caller-supplied [`Session`]; the repository
/// itself holds no connection state. Reads never fail with
/// [`StoreError::NotFound`]; absence is `None`, `false` or an empty vec.
#[async_trait]
pub trait EntityOps: Send + Sync {
    /// The entity type this repository serves
    type Model: Entity;

    /// Look up one entity by id. Inactive entities are treated as absent
    /// unless `include_inactive` is set.
    async fn get(
        &self,
        session: &mut Session,
        id: &<Self::Model as Entity>::Id,
        include_inactive: bool,
    ) -> Result<Option<Self::Model>, StoreError>;

    /// List entities in storage default order with skip/limit pagination
    async fn get_all(
        &self,
        session: &mut Session,
        page: Page,
        include_inactive: bool,
    ) -> Result<Vec<Self::Model>, StoreError>;

    /// Like `get_all`, with equality filters on known columns. Unknown
    /// filter keys are silently ignored.
    async fn filter(
        &self,
        session: &mut Session,
        filters: &Fields,
        page: Page,
        include_inactive: bool,
    ) -> Result<Vec<Self::Model>, StoreError>;

    /// Insert one entity built from the payload and return the persisted row
    async fn create(
        &self,
        session: &mut Session,
        data: &Fields,
    ) -> Result<Self::Model, StoreError>;

    /// Insert a batch of entities atomically
    async fn create_many(
        &self,
        session: &mut Session,
        batch: &[Fields],
    ) -> Result<Vec<Self::Model>, StoreError>;

    /// Assign the payload's known columns on an active entity and return the
    /// updated row. Unknown keys and the id column are ignored.
    async fn update(
        &self,
        session: &mut Session,
        id: &<Self::Model as Entity>::Id,
        data: &Fields,
    ) -> Result<Self::Model, StoreError>;

    /// Soft-delete an active entity by clearing its active column
    async fn delete(
        &self,
        session: &mut Session,
        id: &<Self::Model as Entity>::Id,
    ) -> Result<bool, StoreError>;

    /// Count entities matching the same visibility and filter rules as
    /// `filter`, without materializing rows
    async fn count(
        &self,
        session: &mut Session,
        filters: &Fields,
        include_inactive: bool,
    ) -> Result<i64, StoreError>;

    /// True iff `get` with the same arguments would return an entity
    async fn exists(
        &self,
        session: &mut Session,
        id: &<Self::Model as Entity>::Id,
        include_inactive: bool,
    ) -> Result<bool, StoreError>;
}

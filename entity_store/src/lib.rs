//! Entity Store - core database abstraction layer for Registro
//!
//! This crate provides the generic repository used by the automation
//! scripts: a type-parameterized set of persistence operations (get, list,
//! filter, create, update, soft-delete, count, exists) over any type
//! implementing [`Entity`], honoring the `ativo` active-column convention
//! for default visibility and soft delete.

pub mod errors;
pub mod fields;
pub mod prelude;
pub mod repository;
pub mod session;
pub mod traits;

pub use errors::StoreError;
pub use fields::{Fields, Page, DEFAULT_PAGE_LIMIT};
pub use repository::{repository_for, Repository};
pub use session::Session;
pub use traits::{Entity, EntityOps};

use sqlx::PgPool;

pub type DbPool = PgPool;

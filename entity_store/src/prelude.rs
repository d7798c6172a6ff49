//! Convenience re-exports for common entity-store usage

// Core traits
pub use crate::traits::{Entity, EntityOps};

// Error types
pub use crate::errors::StoreError;

// Repository and its collaborators
pub use crate::fields::{Fields, Page};
pub use crate::repository::{repository_for, Repository};
pub use crate::session::Session;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde_json::{json, Value};
pub use sqlx::{FromRow, PgPool, Row};
pub use uuid::Uuid;

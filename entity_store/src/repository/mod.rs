//! Generic repository
//!
//! This module provides the type-parameterized CRUD facade over any
//! [`Entity`](crate::traits::Entity), honoring the active-column soft-delete
//! convention.

mod core;
mod ops;
pub(crate) mod sql;

pub use self::core::{repository_for, Repository};

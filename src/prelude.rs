//! Convenience re-exports for common Registro usage
//!
//! # Example
//!
//! ```rust
//! use registro::prelude::*;
//! ```

// Core Registro components
pub use crate::core::Registro;
pub use crate::errors::RegistroError;
pub use crate::migration;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig};

// Re-export commonly used entity-store types for convenience
pub use entity_store::prelude::*;

// Re-export entity_store itself for callers that need the full module
pub use entity_store;

// Common external dependencies
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx and chrono types
pub use chrono::{DateTime, Utc};
pub use sqlx::{Postgres, Transaction};

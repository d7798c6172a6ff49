//! # Registro
//!
//! Shared PostgreSQL base library for internal automation scripts: a generic
//! soft-delete repository over any entity type, caller-owned sessions, and
//! centralized configuration.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use registro::prelude::*;
//!
//! #[derive(Debug, Clone, FromRow)]
//! pub struct Usuario {
//!     pub id: i32,
//!     pub nome: String,
//!     pub ativo: bool,
//! }
//!
//! impl Entity for Usuario {
//!     type Id = i32;
//!
//!     fn entity_name() -> &'static str {
//!         "Usuario"
//!     }
//!
//!     fn table_name() -> &'static str {
//!         "usuarios"
//!     }
//!
//!     fn columns() -> &'static [&'static str] {
//!         &["id", "nome", "ativo"]
//!     }
//!
//!     fn schema() -> &'static [(&'static str, &'static str)] {
//!         &[
//!             ("id", "SERIAL PRIMARY KEY"),
//!             ("nome", "TEXT NOT NULL"),
//!             ("ativo", "BOOLEAN NOT NULL DEFAULT TRUE"),
//!         ]
//!     }
//!
//!     fn active_column() -> Option<&'static str> {
//!         Some("ativo")
//!     }
//!
//!     fn id(&self) -> i32 {
//!         self.id
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let registro = Registro::new(&config).await?;
//!     registro.auto_migrate::<Usuario>(false).await?;
//!
//!     let usuarios = registro.repository::<Usuario>();
//!     let mut session = registro.session().await?;
//!
//!     let criado = usuarios
//!         .create(&mut session, &Fields::new().set("nome", "Ana"))
//!         .await?;
//!     println!("created usuario {}", criado.id);
//!
//!     // Soft delete: the row stays, flagged inactive
//!     usuarios.delete(&mut session, &criado.id).await?;
//!     assert!(usuarios.get(&mut session, &criado.id, false).await?.is_none());
//!     assert!(usuarios.get(&mut session, &criado.id, true).await?.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::Registro;
pub use errors::RegistroError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig};

// Re-export the store core
pub use entity_store;
pub use entity_store::{Entity, EntityOps, Fields, Page, Repository, Session, StoreError};

// Re-export external dependencies used in the public API
pub use async_trait;
pub use sqlx;

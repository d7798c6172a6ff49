//! Core Registro functionality
//!
//! This module contains the main `Registro` coordinator, which owns the
//! PostgreSQL connection pool and hands out sessions and repositories. The
//! coordinator is explicitly constructed from configuration at the
//! application entry point; nothing here is global or implicit.

use std::time::Duration;

use sqlx::PgPool;

use crate::errors::RegistroError;
use config::DatabaseConfig;
use entity_store::{repository_for, Entity, Repository, Session};

/// Main coordinator that owns the database connection pool
pub struct Registro {
    pool: PgPool,
}

impl Registro {
    /// Connect a pool according to the database configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self, RegistroError> {
        config.validate()?;

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&config.connection_string()).await?;
        tracing::debug!(host = %config.host, database = %config.database, "pool connected");

        Ok(Self { pool })
    }

    /// Wrap an already-connected pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquire a session for repository operations
    pub async fn session(&self) -> Result<Session, RegistroError> {
        Ok(Session::acquire(&self.pool).await?)
    }

    /// Configured repository for an entity type
    pub fn repository<T: Entity>(&self) -> Repository<T> {
        repository_for::<T>()
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), RegistroError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

impl std::fmt::Debug for Registro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registro")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

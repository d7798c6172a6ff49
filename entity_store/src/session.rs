//! Session handle supplied by callers to every repository operation.
//!
//! A [`Session`] owns one pooled PostgreSQL connection for the duration of a
//! unit of work. Repositories never acquire connections themselves; the
//! caller decides session lifetime and may run several repository calls over
//! the same session. Mutating operations open a transaction on the session's
//! connection via [`Session::begin`].

use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::errors::StoreError;

pub struct Session {
    conn: PoolConnection<Postgres>,
}

impl Session {
    /// Check out a connection from the pool
    pub async fn acquire(pool: &PgPool) -> Result<Self, StoreError> {
        let conn = pool
            .acquire()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// The underlying connection, for executing queries
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Begin a transaction on this session's connection
    pub async fn begin(&mut self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        sqlx::Connection::begin(&mut *self.conn).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

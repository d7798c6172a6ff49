use thiserror::Error;

/// Top-level error type for the coordinator surface.
///
/// Repository operations keep surfacing [`entity_store::StoreError`]
/// directly; this enum only exists where configuration, pool and store
/// concerns meet.
#[derive(Debug, Error)]
pub enum RegistroError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Store(#[from] entity_store::StoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

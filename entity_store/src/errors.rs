use serde_json::Value;
use thiserror::Error;

use crate::traits::Entity;

/// Errors surfaced by repository operations.
///
/// `NotFound` and `QueryFailed` carry the entity name and the relevant
/// identifier/payload as structured context for diagnostics. `Driver` is the
/// unwrapped sqlx error used by the `create_many` batch path and by
/// transaction plumbing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} with id={id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("query failed for {entity} ({operation}): {reason}")]
    QueryFailed {
        entity: &'static str,
        operation: &'static str,
        payload: Option<Value>,
        reason: String,
    },

    #[error("database connection error: {0}")]
    Connection(String),

    #[error(transparent)]
    Driver(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found<T: Entity>(id: &T::Id) -> Self {
        tracing::error!(entity = T::entity_name(), %id, "entity not found");
        Self::NotFound {
            entity: T::entity_name(),
            id: id.to_string(),
        }
    }

    pub fn query_failed<T: Entity>(
        operation: &'static str,
        payload: Option<Value>,
        reason: impl Into<String>,
    ) -> Self {
        let reason = reason.into();
        tracing::error!(entity = T::entity_name(), operation, %reason, "query failed");
        Self::QueryFailed {
            entity: T::entity_name(),
            operation,
            payload,
            reason,
        }
    }

    pub fn soft_delete_unsupported<T: Entity>() -> Self {
        Self::query_failed::<T>(
            "delete",
            None,
            format!(
                "{} has no active column, soft delete is unsupported",
                T::entity_name()
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, sqlx::FromRow)]
    #[allow(dead_code)]
    struct Marcador {
        id: i32,
        rotulo: String,
    }

    impl Entity for Marcador {
        type Id = i32;

        fn entity_name() -> &'static str {
            "Marcador"
        }

        fn table_name() -> &'static str {
            "marcadores"
        }

        fn columns() -> &'static [&'static str] {
            &["id", "rotulo"]
        }

        fn schema() -> &'static [(&'static str, &'static str)] {
            &[("id", "SERIAL PRIMARY KEY"), ("rotulo", "TEXT NOT NULL")]
        }

        fn id(&self) -> i32 {
            self.id
        }
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = StoreError::not_found::<Marcador>(&7);
        assert_eq!(err.to_string(), "Marcador with id=7 not found");
    }

    #[test]
    fn query_failed_keeps_payload() {
        let payload = json!({"rotulo": "urgente"});
        let err =
            StoreError::query_failed::<Marcador>("create", Some(payload.clone()), "boom");
        match err {
            StoreError::QueryFailed {
                entity,
                operation,
                payload: Some(p),
                reason,
            } => {
                assert_eq!(entity, "Marcador");
                assert_eq!(operation, "create");
                assert_eq!(p, payload);
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn soft_delete_unsupported_is_query_failed() {
        let err = StoreError::soft_delete_unsupported::<Marcador>();
        assert!(err.to_string().contains("soft delete is unsupported"));
        assert!(matches!(err, StoreError::QueryFailed { operation: "delete", .. }));
    }
}

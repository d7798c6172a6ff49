//! Repository operation implementations
//!
//! Every mutating operation commits exactly once and rolls back exactly once
//! on failure before surfacing a typed error; composing several calls into
//! one atomic unit is the caller's responsibility. Read operations never
//! produce `NotFound`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;

use super::sql::{self, Clause};
use super::Repository;
use crate::errors::StoreError;
use crate::fields::{Fields, Page};
use crate::session::Session;
use crate::traits::{Entity, EntityOps};

// Shared parameter binding for JSON payload values: RFC3339 strings become
// timestamps, UUID strings become uuids, integers prefer i32 when they fit.
macro_rules! bind_field_value {
    ($query:expr, $value:expr) => {
        match $value {
            serde_json::Value::String(s) => {
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                } else if let Ok(id) = uuid::Uuid::parse_str(&s) {
                    $query.bind(id)
                } else {
                    $query.bind(s)
                }
            }
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

/// Active-column guard for read statements
fn visibility<T: Entity>(include_inactive: bool) -> Option<&'static str> {
    if include_inactive {
        None
    } else {
        T::active_column()
    }
}

/// Turn an equality-filter set into WHERE clauses and owned bind values,
/// dropping keys that name no registered column.
fn equality_clauses<'f, T: Entity>(filters: &'f Fields) -> (Vec<Clause<'f>>, Vec<Value>) {
    let (known, unknown) = filters.partition(T::columns());
    if !unknown.is_empty() {
        tracing::debug!(
            entity = T::entity_name(),
            skipped = ?unknown,
            "ignoring unknown filter fields"
        );
    }

    let mut clauses = Vec::with_capacity(known.len());
    let mut binds = Vec::new();
    for (name, value) in known {
        if value.is_null() {
            clauses.push(Clause::IsNull(name));
        } else {
            clauses.push(Clause::Eq(name));
            binds.push(value.clone());
        }
    }
    (clauses, binds)
}

#[async_trait]
impl<T: Entity> EntityOps for Repository<T> {
    type Model = T;

    async fn get(
        &self,
        session: &mut Session,
        id: &T::Id,
        include_inactive: bool,
    ) -> Result<Option<T>, StoreError> {
        let statement =
            sql::select_by_id(T::table_name(), T::id_column(), visibility::<T>(include_inactive));
        sqlx::query_as::<_, T>(&statement)
            .bind(id)
            .fetch_optional(session.conn())
            .await
            .map_err(|e| StoreError::query_failed::<T>("get", None, e.to_string()))
    }

    async fn get_all(
        &self,
        session: &mut Session,
        page: Page,
        include_inactive: bool,
    ) -> Result<Vec<T>, StoreError> {
        let statement =
            sql::select_page(T::table_name(), visibility::<T>(include_inactive), &[]);
        sqlx::query_as::<_, T>(&statement)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(session.conn())
            .await
            .map_err(|e| StoreError::query_failed::<T>("get_all", None, e.to_string()))
    }

    async fn filter(
        &self,
        session: &mut Session,
        filters: &Fields,
        page: Page,
        include_inactive: bool,
    ) -> Result<Vec<T>, StoreError> {
        let (clauses, binds) = equality_clauses::<T>(filters);
        let statement =
            sql::select_page(T::table_name(), visibility::<T>(include_inactive), &clauses);

        let mut query = sqlx::query_as::<_, T>(&statement);
        for value in binds {
            query = bind_field_value!(query, value);
        }
        query
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(session.conn())
            .await
            .map_err(|e| {
                StoreError::query_failed::<T>("filter", Some(filters.to_json()), e.to_string())
            })
    }

    async fn create(&self, session: &mut Session, data: &Fields) -> Result<T, StoreError> {
        let (known, unknown) = data.partition(T::columns());
        if !unknown.is_empty() {
            return Err(StoreError::query_failed::<T>(
                "create",
                Some(data.to_json()),
                format!("unknown columns: {}", unknown.join(", ")),
            ));
        }

        let columns: Vec<&str> = known.iter().map(|(name, _)| *name).collect();
        let statement = sql::insert(T::table_name(), &columns);

        let mut tx = session.begin().await.map_err(|e| {
            StoreError::query_failed::<T>("create", Some(data.to_json()), e.to_string())
        })?;

        let mut query = sqlx::query_as::<_, T>(&statement);
        for (_, value) in &known {
            query = bind_field_value!(query, (*value).clone());
        }

        match query.fetch_one(tx.as_mut()).await {
            Ok(created) => {
                tx.commit().await.map_err(|e| {
                    StoreError::query_failed::<T>("create", Some(data.to_json()), e.to_string())
                })?;
                tracing::debug!(entity = T::entity_name(), id = %created.id(), "created");
                Ok(created)
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(StoreError::query_failed::<T>(
                    "create",
                    Some(data.to_json()),
                    e.to_string(),
                ))
            }
        }
    }

    // Batch creation keeps the historical contract of surfacing the driver
    // error unwrapped after rollback, unlike `create`.
    async fn create_many(
        &self,
        session: &mut Session,
        batch: &[Fields],
    ) -> Result<Vec<T>, StoreError> {
        let mut tx = session.begin().await?;
        let mut created = Vec::with_capacity(batch.len());

        for data in batch {
            let (known, unknown) = data.partition(T::columns());
            if !unknown.is_empty() {
                let _ = tx.rollback().await;
                return Err(StoreError::query_failed::<T>(
                    "create_many",
                    Some(data.to_json()),
                    format!("unknown columns: {}", unknown.join(", ")),
                ));
            }

            let columns: Vec<&str> = known.iter().map(|(name, _)| *name).collect();
            let statement = sql::insert(T::table_name(), &columns);

            let mut query = sqlx::query_as::<_, T>(&statement);
            for (_, value) in &known {
                query = bind_field_value!(query, (*value).clone());
            }

            match query.fetch_one(tx.as_mut()).await {
                Ok(row) => created.push(row),
                Err(e) => {
                    let _ = tx.rollback().await;
                    return Err(StoreError::Driver(e));
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(entity = T::entity_name(), count = created.len(), "batch created");
        Ok(created)
    }

    async fn update(
        &self,
        session: &mut Session,
        id: &T::Id,
        data: &Fields,
    ) -> Result<T, StoreError> {
        let (known, unknown) = data.partition(T::columns());
        if !unknown.is_empty() {
            tracing::debug!(
                entity = T::entity_name(),
                skipped = ?unknown,
                "ignoring unknown update fields"
            );
        }

        // The id is immutable; a payload that names it does not move the row.
        let assignable: Vec<(&str, &Value)> = known
            .into_iter()
            .filter(|(name, _)| *name != T::id_column())
            .collect();

        if assignable.is_empty() {
            return self
                .get(session, id, false)
                .await?
                .ok_or_else(|| StoreError::not_found::<T>(id));
        }

        let columns: Vec<&str> = assignable.iter().map(|(name, _)| *name).collect();
        let statement =
            sql::update_by_id(T::table_name(), T::id_column(), T::active_column(), &columns);

        let mut tx = session.begin().await.map_err(|e| {
            StoreError::query_failed::<T>("update", Some(data.to_json()), e.to_string())
        })?;

        let mut query = sqlx::query_as::<_, T>(&statement);
        for (_, value) in &assignable {
            query = bind_field_value!(query, (*value).clone());
        }
        query = query.bind(id);

        match query.fetch_optional(tx.as_mut()).await {
            Ok(Some(updated)) => {
                tx.commit().await.map_err(|e| {
                    StoreError::query_failed::<T>("update", Some(data.to_json()), e.to_string())
                })?;
                tracing::debug!(entity = T::entity_name(), %id, "updated");
                Ok(updated)
            }
            Ok(None) => {
                let _ = tx.rollback().await;
                Err(StoreError::not_found::<T>(id))
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(StoreError::query_failed::<T>(
                    "update",
                    Some(data.to_json()),
                    e.to_string(),
                ))
            }
        }
    }

    async fn delete(&self, session: &mut Session, id: &T::Id) -> Result<bool, StoreError> {
        // Refused uniformly for entity types without the active column,
        // whether or not the id exists; hard deletion is not offered here.
        let Some(active_column) = T::active_column() else {
            return Err(StoreError::soft_delete_unsupported::<T>());
        };

        let statement = sql::soft_delete(T::table_name(), T::id_column(), active_column);

        let mut tx = session
            .begin()
            .await
            .map_err(|e| StoreError::query_failed::<T>("delete", None, e.to_string()))?;

        match sqlx::query(&statement).bind(id).execute(tx.as_mut()).await {
            Ok(result) if result.rows_affected() > 0 => {
                tx.commit().await.map_err(|e| {
                    StoreError::query_failed::<T>("delete", None, e.to_string())
                })?;
                tracing::debug!(entity = T::entity_name(), %id, "soft deleted");
                Ok(true)
            }
            Ok(_) => {
                let _ = tx.rollback().await;
                Err(StoreError::not_found::<T>(id))
            }
            Err(e) => {
                let _ = tx.rollback().await;
                Err(StoreError::query_failed::<T>("delete", None, e.to_string()))
            }
        }
    }

    async fn count(
        &self,
        session: &mut Session,
        filters: &Fields,
        include_inactive: bool,
    ) -> Result<i64, StoreError> {
        let (clauses, binds) = equality_clauses::<T>(filters);
        let statement =
            sql::count_rows(T::table_name(), visibility::<T>(include_inactive), &clauses);

        let mut query = sqlx::query(&statement);
        for value in binds {
            query = bind_field_value!(query, value);
        }
        let row = query.fetch_one(session.conn()).await.map_err(|e| {
            StoreError::query_failed::<T>("count", Some(filters.to_json()), e.to_string())
        })?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| StoreError::query_failed::<T>("count", None, e.to_string()))?;
        Ok(total)
    }

    async fn exists(
        &self,
        session: &mut Session,
        id: &T::Id,
        include_inactive: bool,
    ) -> Result<bool, StoreError> {
        let statement =
            sql::exists_by_id(T::table_name(), T::id_column(), visibility::<T>(include_inactive));
        let row = sqlx::query(&statement)
            .bind(id)
            .fetch_optional(session.conn())
            .await
            .map_err(|e| StoreError::query_failed::<T>("exists", None, e.to_string()))?;
        Ok(row.is_some())
    }
}

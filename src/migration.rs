//! Table creation helpers driven by entity schemas
//!
//! The CREATE TABLE statement is assembled from [`Entity::schema`], so the
//! automation scripts can bootstrap their tables without hand-written DDL.
//! Timestamps and defaults are declared in the schema itself; the repository
//! never maintains them.

use crate::core::Registro;
use crate::errors::RegistroError;
use entity_store::Entity;

/// Generate the CREATE TABLE statement for an entity type
pub fn create_table_sql<T: Entity>() -> String {
    let columns: Vec<String> = T::schema()
        .iter()
        .map(|(name, column_type)| format!("{name} {column_type}"))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        T::table_name(),
        columns.join(", ")
    )
}

/// Generate the DROP TABLE statement for an entity type
pub fn drop_table_sql<T: Entity>() -> String {
    format!("DROP TABLE IF EXISTS {}", T::table_name())
}

impl Registro {
    /// Create the table for an entity type if missing.
    /// If `recreate` is true, drops any existing table first.
    pub async fn auto_migrate<T: Entity>(&self, recreate: bool) -> Result<(), RegistroError> {
        if recreate {
            let drop_sql = drop_table_sql::<T>();
            tracing::debug!(sql = %drop_sql, "dropping table");
            sqlx::query(&drop_sql).execute(self.pool()).await?;
        }

        let create_sql = create_table_sql::<T>();
        tracing::debug!(sql = %create_sql, "creating table");
        sqlx::query(&create_sql).execute(self.pool()).await?;

        Ok(())
    }
}

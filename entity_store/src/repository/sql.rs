//! SQL statement construction for repository operations.
//!
//! Statements are built here as pure functions of table metadata so the
//! generated SQL is testable without a database. Placeholders are numbered in
//! bind order: equality filter values first, then pagination, with the id
//! always last for keyed statements. Column and table names come from the
//! entity's static registry, never from caller input.

use std::fmt::Write;

/// One WHERE condition over a registered column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause<'a> {
    /// `column = $n`
    Eq(&'a str),
    /// `column IS NULL` (binds nothing)
    IsNull(&'a str),
}

/// Render the WHERE fragment (leading space included when non-empty) and
/// return the next free placeholder number.
fn where_fragment(active: Option<&str>, clauses: &[Clause<'_>]) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::with_capacity(clauses.len() + 1);
    let mut next_param = 1;

    if let Some(column) = active {
        conditions.push(format!("{column} = TRUE"));
    }
    for clause in clauses {
        match clause {
            Clause::Eq(column) => {
                conditions.push(format!("{column} = ${next_param}"));
                next_param += 1;
            }
            Clause::IsNull(column) => conditions.push(format!("{column} IS NULL")),
        }
    }

    if conditions.is_empty() {
        (String::new(), next_param)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), next_param)
    }
}

pub(crate) fn select_by_id(table: &str, id_column: &str, active: Option<&str>) -> String {
    let mut sql = format!("SELECT * FROM {table} WHERE {id_column} = $1");
    if let Some(column) = active {
        let _ = write!(sql, " AND {column} = TRUE");
    }
    sql
}

pub(crate) fn exists_by_id(table: &str, id_column: &str, active: Option<&str>) -> String {
    let mut sql = format!("SELECT 1 FROM {table} WHERE {id_column} = $1");
    if let Some(column) = active {
        let _ = write!(sql, " AND {column} = TRUE");
    }
    sql.push_str(" LIMIT 1");
    sql
}

pub(crate) fn select_page(table: &str, active: Option<&str>, clauses: &[Clause<'_>]) -> String {
    let (where_sql, next_param) = where_fragment(active, clauses);
    format!(
        "SELECT * FROM {table}{where_sql} LIMIT ${next_param} OFFSET ${}",
        next_param + 1
    )
}

pub(crate) fn count_rows(table: &str, active: Option<&str>, clauses: &[Clause<'_>]) -> String {
    let (where_sql, _) = where_fragment(active, clauses);
    format!("SELECT COUNT(*) AS total FROM {table}{where_sql}")
}

pub(crate) fn insert(table: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {table} DEFAULT VALUES RETURNING *");
    }
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${n}")).collect();
    format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING *",
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn update_by_id(
    table: &str,
    id_column: &str,
    active: Option<&str>,
    columns: &[&str],
) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ${}", i + 1))
        .collect();
    let mut sql = format!(
        "UPDATE {table} SET {} WHERE {id_column} = ${}",
        assignments.join(", "),
        columns.len() + 1
    );
    if let Some(column) = active {
        let _ = write!(sql, " AND {column} = TRUE");
    }
    sql.push_str(" RETURNING *");
    sql
}

pub(crate) fn soft_delete(table: &str, id_column: &str, active_column: &str) -> String {
    format!(
        "UPDATE {table} SET {active_column} = FALSE \
         WHERE {id_column} = $1 AND {active_column} = TRUE"
    )
}

//! SQL query builder for ORM entities
//!
//! Builds parameterized SELECT statements for `DatabaseEntity` types and
//! decodes the rows through `FromSqlRow`.

use std::marker::PhantomData;

use sqlx::SqlitePool;

use super::traits::{DatabaseEntity, FromSqlRow, SqlValue};

/// A query builder for database entities.
pub struct EntityQuery<E: DatabaseEntity> {
    _phantom: PhantomData<E>,
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_by: Option<String>,
    limit: Option<i64>,
    param_counter: usize,
}

impl<E: DatabaseEntity + FromSqlRow> Default for EntityQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DatabaseEntity + FromSqlRow> EntityQuery<E> {
    /// Create a new query builder for the entity type.
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_by: None,
            limit: None,
            param_counter: 0,
        }
    }

    /// Add a WHERE condition with a single `?` placeholder.
    pub fn where_clause(mut self, condition: &str, value: SqlValue) -> Self {
        self.param_counter += 1;
        let rewritten = condition.replace('?', &format!("?{}", self.param_counter));
        self.where_clauses.push(rewritten);
        self.values.push(value);
        self
    }

    /// Add default sorting if no order is specified.
    pub fn default_order(mut self) -> Self {
        if self.order_by.is_none() {
            self.order_by = Some(format!("{} {}", E::DEFAULT_SORT, E::DEFAULT_SORT_DIR));
        }
        self
    }

    /// Set limit directly.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the final SQL statement.
    pub fn build_sql(&self) -> String {
        let mut sql = E::select_sql();

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(ref order) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        sql
    }

    /// Execute the query and decode every row.
    pub async fn fetch_all(&self, pool: &SqlitePool) -> Result<Vec<E>, sqlx::Error> {
        let sql = self.build_sql();
        let mut query = sqlx::query(&sql);
        for value in &self.values {
            query = value.bind_to_query(query);
        }

        let rows = query.fetch_all(pool).await?;
        rows.iter().map(E::from_row).collect()
    }

    /// Execute the query and return the first row, if any.
    pub async fn fetch_optional(self, pool: &SqlitePool) -> Result<Option<E>, sqlx::Error> {
        let results = self.limit(1).fetch_all(pool).await?;
        Ok(results.into_iter().next())
    }
}

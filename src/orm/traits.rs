//! Core traits for the ORM layer
//!
//! Entities describe their table once (name, columns, default sort) and the
//! query builder, schema sync and repositories work from that description.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;

/// Column definition for schema generation.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name in the database
    pub name: &'static str,
    /// SQLite column type (TEXT, INTEGER, REAL, BLOB)
    pub sql_type: &'static str,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Whether this is the primary key
    pub is_primary_key: bool,
    /// Default value expression (e.g., "''")
    pub default: Option<&'static str>,
}

impl ColumnDef {
    /// Generate the column definition SQL
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY");
            if self.sql_type == "INTEGER" {
                sql.push_str(" AUTOINCREMENT");
            }
        }

        if !self.nullable && !self.is_primary_key {
            sql.push_str(" NOT NULL");
        }

        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        sql
    }
}

/// Metadata about a database entity (table).
pub trait DatabaseEntity: Sized + Send + Sync {
    /// The SQL table name (e.g., "cars")
    const TABLE_NAME: &'static str;

    /// The primary key column name (e.g., "id")
    const PRIMARY_KEY: &'static str;

    /// Default sort column for list queries
    const DEFAULT_SORT: &'static str;

    /// Default sort direction
    const DEFAULT_SORT_DIR: &'static str = "ASC";

    /// List of all column names in the table
    fn column_names() -> &'static [&'static str];

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        let columns = Self::column_names().join(", ");
        format!("SELECT {} FROM {}", columns, Self::TABLE_NAME)
    }
}

/// Trait for database schema generation and migration.
pub trait DatabaseSchema: DatabaseEntity {
    /// Get all column definitions for this entity's table
    fn columns() -> &'static [ColumnDef];

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    fn create_table_sql() -> String {
        let column_defs: Vec<String> = Self::columns().iter().map(|c| c.to_sql()).collect();

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            Self::TABLE_NAME,
            column_defs.join(",\n  ")
        )
    }
}

/// Trait for decoding a database row into an entity.
pub trait FromSqlRow: Sized {
    /// Decode a SQLite row into this entity type
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

/// A record that carries a display name and a reference to an image file.
pub trait ImageRecord: Send + Sync {
    fn id(&self) -> i64;

    /// Human-readable name used for matching
    fn name(&self) -> &str;

    /// Current image reference, if any
    fn image(&self) -> Option<&str>;

    fn set_image(&mut self, path: String);
}

/// The two store operations the image assigner depends on.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: ImageRecord;

    /// Load every record, in a stable order
    async fn list_all(&self) -> Result<Vec<Self::Record>, sqlx::Error>;

    /// Persist a single record immediately
    async fn save(&self, record: &Self::Record) -> Result<(), sqlx::Error>;
}

/// Represents a SQL value that can be bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
}

impl SqlValue {
    /// Bind this value to a sqlx query
    pub fn bind_to_query<'q>(
        &'q self,
        query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    ) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
        match self {
            SqlValue::Int(i) => query.bind(*i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_def_sql() {
        let col = ColumnDef {
            name: "car_name",
            sql_type: "TEXT",
            nullable: false,
            is_primary_key: false,
            default: Some("''"),
        };
        assert_eq!(col.to_sql(), "car_name TEXT NOT NULL DEFAULT ''");
    }

    #[test]
    fn test_integer_primary_key_autoincrements() {
        let col = ColumnDef {
            name: "id",
            sql_type: "INTEGER",
            nullable: false,
            is_primary_key: true,
            default: None,
        };
        assert_eq!(col.to_sql(), "id INTEGER PRIMARY KEY AUTOINCREMENT");
    }

    #[test]
    fn test_nullable_column_has_no_constraint() {
        let col = ColumnDef {
            name: "image",
            sql_type: "TEXT",
            nullable: true,
            is_primary_key: false,
            default: None,
        };
        assert_eq!(col.to_sql(), "image TEXT");
    }
}

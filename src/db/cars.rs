//! Car database repository

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::orm::{
    ColumnDef, DatabaseEntity, DatabaseSchema, EntityQuery, FromSqlRow, ImageRecord, RecordStore,
    SqlValue,
};

/// Car record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: i64,
    pub car_name: String,
    /// Path relative to the media root (e.g. `car/images/Toyota Corolla.jpg`)
    pub image: Option<String>,
}

/// Input for creating a car
#[derive(Debug, Clone)]
pub struct CreateCar {
    pub car_name: String,
    pub image: Option<String>,
}

const CAR_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        name: "id",
        sql_type: "INTEGER",
        nullable: false,
        is_primary_key: true,
        default: None,
    },
    ColumnDef {
        name: "car_name",
        sql_type: "TEXT",
        nullable: false,
        is_primary_key: false,
        default: None,
    },
    ColumnDef {
        name: "image",
        sql_type: "TEXT",
        nullable: true,
        is_primary_key: false,
        default: None,
    },
];

impl DatabaseEntity for CarRecord {
    const TABLE_NAME: &'static str = "cars";
    const PRIMARY_KEY: &'static str = "id";
    const DEFAULT_SORT: &'static str = "id";

    fn column_names() -> &'static [&'static str] {
        &["id", "car_name", "image"]
    }
}

impl DatabaseSchema for CarRecord {
    fn columns() -> &'static [ColumnDef] {
        CAR_COLUMNS
    }
}

impl FromSqlRow for CarRecord {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            car_name: row.try_get("car_name")?,
            image: row.try_get("image")?,
        })
    }
}

impl ImageRecord for CarRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.car_name
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image(&mut self, path: String) {
        self.image = Some(path);
    }
}

pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every car, ordered by primary key
    pub async fn list_all(&self) -> Result<Vec<CarRecord>, sqlx::Error> {
        EntityQuery::<CarRecord>::new()
            .default_order()
            .fetch_all(&self.pool)
            .await
    }

    /// Get a car by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<CarRecord>, sqlx::Error> {
        EntityQuery::<CarRecord>::new()
            .where_clause(&format!("{} = ?", CarRecord::PRIMARY_KEY), SqlValue::Int(id))
            .fetch_optional(&self.pool)
            .await
    }

    /// Create a new car
    pub async fn create(&self, input: CreateCar) -> Result<CarRecord> {
        let result = sqlx::query("INSERT INTO cars (car_name, image) VALUES (?, ?)")
            .bind(&input.car_name)
            .bind(&input.image)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Car {} not found after insert", id))
    }

    /// Write the record's name and image back to its row
    pub async fn save(&self, car: &CarRecord) -> Result<(), sqlx::Error> {
        let sql = format!(
            "UPDATE {} SET car_name = ?, image = ? WHERE {} = ?",
            CarRecord::TABLE_NAME,
            CarRecord::PRIMARY_KEY
        );
        let result = sqlx::query(&sql)
            .bind(&car.car_name)
            .bind(&car.image)
            .bind(car.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for CarRepository {
    type Record = CarRecord;

    async fn list_all(&self) -> Result<Vec<CarRecord>, sqlx::Error> {
        CarRepository::list_all(self).await
    }

    async fn save(&self, record: &CarRecord) -> Result<(), sqlx::Error> {
        CarRepository::save(self, record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use assert_matches::assert_matches;

    async fn test_db() -> Database {
        Database::connect_in_memory().await.unwrap()
    }

    fn car(name: &str) -> CreateCar {
        CreateCar {
            car_name: name.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_id_order() {
        let db = test_db().await;
        let repo = db.cars();

        let first = repo.create(car("Toyota Corolla")).await.unwrap();
        let second = repo.create(car("Honda Civic")).await.unwrap();
        assert!(first.id < second.id);

        let all = repo.list_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.car_name.as_str()).collect();
        assert_eq!(names, vec!["Toyota Corolla", "Honda Civic"]);
        assert_eq!(all[1], second);
    }

    #[tokio::test]
    async fn test_save_updates_image() {
        let db = test_db().await;
        let repo = db.cars();

        let mut record = repo.create(car("Toyota Corolla")).await.unwrap();
        assert_eq!(record.image, None);

        record.set_image("car/images/Toyota Corolla.jpg".to_string());
        repo.save(&record).await.unwrap();

        let reloaded = repo.get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(reloaded.image.as_deref(), Some("car/images/Toyota Corolla.jpg"));
    }

    #[tokio::test]
    async fn test_save_missing_row_is_an_error() {
        let db = test_db().await;
        let repo = db.cars();

        let ghost = CarRecord {
            id: 42,
            car_name: "Ghost".to_string(),
            image: Some("car/images/ghost.png".to_string()),
        };
        assert_matches!(repo.save(&ghost).await, Err(sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let db = test_db().await;
        assert!(db.cars().get_by_id(7).await.unwrap().is_none());
    }
}

//! PostgreSQL-backed car store.
//!
//! Every operation is exactly one statement; write paths use `RETURNING`
//! so the caller gets back what the database actually persisted. The only
//! store-level constraint is the primary key on `id`; a violation of it on
//! insert is surfaced as `CarError::DuplicateId`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::{Car, CarError};
use crate::storage::car_store::CarStore;

// Postgres error code for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PostgresCarStore {
    pool: PgPool,
}

impl PostgresCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `cars` table if it does not exist yet. Field rules are
    /// deliberately NOT mirrored as CHECK constraints; the engine owns them.
    pub async fn init_schema(&self) -> Result<(), CarError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cars (
                id VARCHAR(36) PRIMARY KEY,
                make VARCHAR(255) NOT NULL,
                model VARCHAR(255) NOT NULL,
                year INTEGER NOT NULL,
                price INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CarError::storage("init_schema", e))?;
        Ok(())
    }
}

fn car_from_row(row: &PgRow) -> Result<Car, sqlx::Error> {
    Ok(Car {
        id: row.try_get("id")?,
        make: row.try_get("make")?,
        model: row.try_get("model")?,
        year: row.try_get("year")?,
        price: row.try_get("price")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

#[async_trait]
impl CarStore for PostgresCarStore {
    async fn create(&self, car: &Car) -> Result<Car, CarError> {
        let row = sqlx::query(
            "INSERT INTO cars (id, make, model, year, price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, make, model, year, price",
        )
        .bind(&car.id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                CarError::DuplicateId
            } else {
                CarError::storage("create", e)
            }
        })?;
        car_from_row(&row).map_err(|e| CarError::storage("create", e))
    }

    async fn get_by_id(&self, id: &str) -> Result<Car, CarError> {
        let row = sqlx::query(
            "SELECT id, make, model, year, price
             FROM cars
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CarError::storage("get_by_id", e))?;
        match row {
            Some(row) => car_from_row(&row).map_err(|e| CarError::storage("get_by_id", e)),
            None => Err(CarError::NotFound),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>, CarError> {
        let rows = sqlx::query(
            "SELECT id, make, model, year, price
             FROM cars
             ORDER BY id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CarError::storage("list", e))?;
        let mut cars = Vec::with_capacity(rows.len());
        for row in &rows {
            cars.push(car_from_row(row).map_err(|e| CarError::storage("list", e))?);
        }
        Ok(cars)
    }

    async fn update(&self, id: &str, car: &Car) -> Result<Car, CarError> {
        let row = sqlx::query(
            "UPDATE cars
             SET make = $1, model = $2, year = $3, price = $4
             WHERE id = $5
             RETURNING id, make, model, year, price",
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CarError::storage("update", e))?;
        match row {
            Some(row) => car_from_row(&row).map_err(|e| CarError::storage("update", e)),
            None => Err(CarError::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64, CarError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| CarError::storage("delete", e))?;
        Ok(result.rows_affected())
    }
}

//! Storage capability for car records.

use async_trait::async_trait;

use crate::domain::{Car, CarError};

/// Contract between the service layer and a backing store.
///
/// Each operation is a single atomic statement against the store; the
/// implementations translate store-specific conditions (duplicate key,
/// missing row) into the shared taxonomy and wrap everything else as an
/// opaque storage fault. Object-safe so the service can hold
/// `Arc<dyn CarStore>` and tests can substitute an in-memory double.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Inserts a new car. An already-used id yields `CarError::DuplicateId`.
    async fn create(&self, car: &Car) -> Result<Car, CarError>;

    /// Fetches one car by id; a missing row yields `CarError::NotFound`.
    async fn get_by_id(&self, id: &str) -> Result<Car, CarError>;

    /// Lists cars ordered by id ascending. `limit` and `offset` are assumed
    /// already normalized by the caller.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>, CarError>;

    /// Replaces the full record stored under `id` (all fields, not a
    /// partial write). A missing row yields `CarError::NotFound`.
    async fn update(&self, id: &str, car: &Car) -> Result<Car, CarError>;

    /// Deletes by id and reports how many rows were affected. Mapping a
    /// zero count to `NotFound` is the caller's job.
    async fn delete(&self, id: &str) -> Result<u64, CarError>;
}

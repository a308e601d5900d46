//! In-memory car store used as a test double.
//!
//! Backed by a `BTreeMap` keyed by id, which gives the same ascending-id
//! listing order the primary key gives Postgres.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Car, CarError};
use crate::storage::car_store::CarStore;

#[derive(Default)]
pub struct InMemoryCarStore {
    cars: Mutex<BTreeMap<String, Car>>,
}

impl InMemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored cars. Lets tests assert that a failed operation
    /// never reached storage.
    pub async fn len(&self) -> usize {
        self.cars.lock().await.len()
    }
}

#[async_trait]
impl CarStore for InMemoryCarStore {
    async fn create(&self, car: &Car) -> Result<Car, CarError> {
        let mut cars = self.cars.lock().await;
        if cars.contains_key(&car.id) {
            return Err(CarError::DuplicateId);
        }
        cars.insert(car.id.clone(), car.clone());
        Ok(car.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Car, CarError> {
        let cars = self.cars.lock().await;
        cars.get(id).cloned().ok_or(CarError::NotFound)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>, CarError> {
        let cars = self.cars.lock().await;
        Ok(cars
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, car: &Car) -> Result<Car, CarError> {
        let mut cars = self.cars.lock().await;
        match cars.get_mut(id) {
            Some(existing) => {
                *existing = car.clone();
                Ok(car.clone())
            }
            None => Err(CarError::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64, CarError> {
        let mut cars = self.cars.lock().await;
        Ok(if cars.remove(id).is_some() { 1 } else { 0 })
    }
}

//! The car service: validation, patch merge, and pagination normalization.
//!
//! This layer sits between the HTTP handlers and the store. It is the only
//! place field rules are enforced, and the only place pagination inputs are
//! clamped. It speaks exclusively in the `CarError` taxonomy; it never sees
//! wire formats or SQL.

use std::sync::Arc;

use crate::domain::{Car, CarError, CarPatch};
use crate::storage::CarStore;

/// Page size applied when the caller asks for zero or fewer rows.
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard ceiling on page size.
pub const MAX_LIMIT: i64 = 100;

pub struct CarService {
    store: Arc<dyn CarStore>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    /// Validates the input in a fixed order and inserts it. The store is
    /// never touched when validation fails. A duplicate id surfaces as
    /// `DuplicateId` from the store's own uniqueness constraint.
    pub async fn create(&self, input: Car) -> Result<Car, CarError> {
        input.validate()?;
        self.store.create(&input).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Car, CarError> {
        if id.is_empty() {
            return Err(CarError::validation("id is required"));
        }
        self.store.get_by_id(id).await
    }

    /// Lists cars ordered by id ascending, with the page fully materialized
    /// per call. Out-of-range pagination inputs are normalized, never
    /// rejected: limit <= 0 becomes the default, limit above the ceiling is
    /// clamped, negative offset becomes 0.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Car>, CarError> {
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        let offset = offset.max(0);
        self.store.list(limit, offset).await
    }

    /// Merges a sparse patch onto the stored record and writes the full
    /// merged record back.
    ///
    /// The fetch happens first: updating a missing car is `NotFound` and no
    /// merge is attempted. A patch field that fails validation aborts
    /// before any write, leaving storage untouched. Absent fields keep
    /// their stored values verbatim. If the row vanishes between fetch and
    /// write-back, the store's zero-row condition surfaces as `NotFound`.
    pub async fn update(&self, id: &str, patch: CarPatch) -> Result<Car, CarError> {
        if id.is_empty() {
            return Err(CarError::validation("id is required"));
        }
        let current = self.store.get_by_id(id).await?;
        let merged = current.merge(&patch)?;
        self.store.update(id, &merged).await
    }

    /// Deletes by id. Zero affected rows is always an explicit `NotFound`,
    /// never a silent success.
    pub async fn delete(&self, id: &str) -> Result<(), CarError> {
        let affected = self.store.delete(id).await?;
        if affected == 0 {
            return Err(CarError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryCarStore;

    fn camry() -> Car {
        Car {
            id: "1".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            price: 25000,
        }
    }

    fn service() -> (CarService, Arc<InMemoryCarStore>) {
        let store = Arc::new(InMemoryCarStore::new());
        (CarService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_valid_car_echoes_input() {
        let (svc, _) = service();
        let created = svc.create(camry()).await.unwrap();
        assert_eq!(created, camry());
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_without_touching_storage() {
        let cases = [
            (
                Car {
                    make: "".to_string(),
                    ..camry()
                },
                "make is required",
            ),
            (
                Car {
                    make: "x".repeat(256),
                    ..camry()
                },
                "make must be less than 255 characters",
            ),
            (
                Car {
                    model: "".to_string(),
                    ..camry()
                },
                "model is required",
            ),
            (
                Car {
                    year: 1899,
                    ..camry()
                },
                "year must be >= 1900",
            ),
            (Car { price: 0, ..camry() }, "price must be positive"),
            (
                Car {
                    price: -1,
                    ..camry()
                },
                "price must be positive",
            ),
        ];
        for (input, want) in cases {
            let (svc, store) = service();
            match svc.create(input).await {
                Err(CarError::Validation(msg)) => assert_eq!(msg, want),
                other => panic!("expected validation error {want:?}, got {other:?}"),
            }
            assert_eq!(store.len().await, 0, "storage must not be touched");
        }
    }

    #[tokio::test]
    async fn create_accepts_make_at_the_255_char_boundary() {
        let (svc, _) = service();
        let input = Car {
            make: "x".repeat(255),
            ..camry()
        };
        let created = svc.create(input.clone()).await.unwrap();
        assert_eq!(created, input);
    }

    #[tokio::test]
    async fn create_duplicate_id_is_a_conflict() {
        let (svc, _) = service();
        svc.create(camry()).await.unwrap();
        let again = Car {
            make: "Honda".to_string(),
            ..camry()
        };
        assert!(matches!(svc.create(again).await, Err(CarError::DuplicateId)));
    }

    #[tokio::test]
    async fn get_by_id_maps_missing_row_to_not_found() {
        let (svc, _) = service();
        assert!(matches!(
            svc.get_by_id("999").await,
            Err(CarError::NotFound)
        ));
    }

    #[tokio::test]
    async fn get_by_id_rejects_empty_id() {
        let (svc, _) = service();
        assert!(matches!(
            svc.get_by_id("").await,
            Err(CarError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_with_empty_patch_round_trips() {
        let (svc, _) = service();
        svc.create(camry()).await.unwrap();
        let updated = svc.update("1", CarPatch::default()).await.unwrap();
        assert_eq!(updated, camry());
    }

    #[tokio::test]
    async fn update_single_field_changes_only_that_field() {
        let (svc, _) = service();
        svc.create(camry()).await.unwrap();
        let patch = CarPatch {
            price: Some(30000),
            ..CarPatch::default()
        };
        let updated = svc.update("1", patch).await.unwrap();
        assert_eq!(
            updated,
            Car {
                price: 30000,
                ..camry()
            }
        );
        // The merged record is what got persisted, not just returned.
        assert_eq!(svc.get_by_id("1").await.unwrap().price, 30000);
    }

    #[tokio::test]
    async fn update_validates_present_fields_with_create_rules() {
        let (svc, _) = service();
        svc.create(camry()).await.unwrap();
        let cases = [
            (
                CarPatch {
                    make: Some("".to_string()),
                    ..CarPatch::default()
                },
                "make is required",
            ),
            (
                CarPatch {
                    model: Some("".to_string()),
                    ..CarPatch::default()
                },
                "model is required",
            ),
            (
                CarPatch {
                    year: Some(1800),
                    ..CarPatch::default()
                },
                "year must be >= 1900",
            ),
            (
                CarPatch {
                    price: Some(0),
                    ..CarPatch::default()
                },
                "price must be positive",
            ),
        ];
        for (patch, want) in cases {
            match svc.update("1", patch).await {
                Err(CarError::Validation(msg)) => assert_eq!(msg, want),
                other => panic!("expected validation error {want:?}, got {other:?}"),
            }
        }
        // A rejected patch must leave the stored record untouched.
        assert_eq!(svc.get_by_id("1").await.unwrap(), camry());
    }

    #[tokio::test]
    async fn update_missing_car_is_not_found_before_any_merge() {
        let (svc, store) = service();
        let patch = CarPatch {
            // Invalid value: the fetch must fail first, so this is never
            // even validated.
            price: Some(-5),
            ..CarPatch::default()
        };
        assert!(matches!(
            svc.update("999", patch).await,
            Err(CarError::NotFound)
        ));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn update_rejects_empty_id() {
        let (svc, _) = service();
        assert!(matches!(
            svc.update("", CarPatch::default()).await,
            Err(CarError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_then_delete_again_is_not_found() {
        let (svc, _) = service();
        svc.create(camry()).await.unwrap();
        svc.delete("1").await.unwrap();
        assert!(matches!(svc.delete("1").await, Err(CarError::NotFound)));
    }

    #[tokio::test]
    async fn delete_missing_car_is_never_a_silent_success() {
        let (svc, _) = service();
        assert!(matches!(svc.delete("999").await, Err(CarError::NotFound)));
    }

    async fn seed(svc: &CarService, n: usize) {
        for i in 0..n {
            svc.create(Car {
                id: format!("{i:03}"),
                ..camry()
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn list_clamps_limit_and_offset() {
        let (svc, _) = service();
        seed(&svc, 120).await;

        // limit <= 0 falls back to the default page size.
        assert_eq!(svc.list(0, 0).await.unwrap().len(), 10);
        assert_eq!(svc.list(-7, 0).await.unwrap().len(), 10);

        // limit above the ceiling is clamped.
        assert_eq!(svc.list(500, 0).await.unwrap().len(), 100);

        // negative offset starts from the beginning.
        let from_start = svc.list(10, -5).await.unwrap();
        assert_eq!(from_start.first().unwrap().id, "000");
    }

    #[tokio::test]
    async fn list_is_ordered_by_id_ascending() {
        let (svc, _) = service();
        seed(&svc, 15).await;
        let page = svc.list(100, 0).await.unwrap();
        let ids: Vec<_> = page.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(page.len(), 15);
    }

    #[tokio::test]
    async fn list_offset_skips_from_the_front() {
        let (svc, _) = service();
        seed(&svc, 15).await;
        let page = svc.list(5, 10).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page.first().unwrap().id, "010");
    }
}

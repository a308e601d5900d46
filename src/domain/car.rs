//! The car record and its field-level validation rules.
//!
//! Validation lives here at the domain boundary; the storage layer never
//! enforces these constraints (the only database-level rule is the primary
//! key on `id`).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::CarError;

/// Maximum accepted length for `make`. `model` intentionally has no bound.
pub const MAX_MAKE_LEN: usize = 255;

/// A persisted car. The `id` is client-supplied and immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
}

/// A sparse partial update. Each field is independently absent (`None`,
/// leave the stored value untouched) or present (`Some`, validate and
/// apply). Never represented as sentinel zero values, which would conflate
/// "set price to 0" with "price not mentioned".
#[derive(Clone, Debug, Default)]
pub struct CarPatch {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i32>,
}

pub fn validate_make(make: &str) -> Result<(), CarError> {
    if make.is_empty() {
        return Err(CarError::validation("make is required"));
    }
    if make.len() > MAX_MAKE_LEN {
        return Err(CarError::validation(
            "make must be less than 255 characters",
        ));
    }
    Ok(())
}

pub fn validate_model(model: &str) -> Result<(), CarError> {
    if model.is_empty() {
        return Err(CarError::validation("model is required"));
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), CarError> {
    if year < 1900 {
        return Err(CarError::validation("year must be >= 1900"));
    }
    Ok(())
}

pub fn validate_price(price: i32) -> Result<(), CarError> {
    if price <= 0 {
        return Err(CarError::validation("price must be positive"));
    }
    Ok(())
}

impl Car {
    /// Checks all field rules in a fixed order, stopping at the first
    /// violation.
    pub fn validate(&self) -> Result<(), CarError> {
        validate_make(&self.make)?;
        validate_model(&self.model)?;
        validate_year(self.year)?;
        validate_price(self.price)?;
        Ok(())
    }

    /// Returns a copy of this car with every present patch field applied.
    /// Present fields are validated with the same rules as creation, in the
    /// same order; absent fields keep their stored value and are not
    /// re-validated. The first violation aborts the merge.
    pub fn merge(&self, patch: &CarPatch) -> Result<Car, CarError> {
        let mut merged = self.clone();
        if let Some(make) = &patch.make {
            validate_make(make)?;
            merged.make = make.clone();
        }
        if let Some(model) = &patch.model {
            validate_model(model)?;
            merged.model = model.clone();
        }
        if let Some(year) = patch.year {
            validate_year(year)?;
            merged.year = year;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            merged.price = price;
        }
        Ok(merged)
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::app::CarService;

#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService>,
    /// Present when backed by Postgres; the health probe pings it. Tests
    /// that run against the in-memory store leave it out.
    pub pool: Option<PgPool>,
}

/// Body accepted by PUT/PATCH. Fields omitted from the payload stay
/// `None` ("leave unchanged"); this is what keeps "not mentioned" apart
/// from "set to zero".
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateCarRequest {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: Option<i32>,
}

impl From<UpdateCarRequest> for crate::domain::CarPatch {
    fn from(req: UpdateCarRequest) -> Self {
        crate::domain::CarPatch {
            make: req.make,
            model: req.model,
            year: req.year,
            price: req.price,
        }
    }
}

/// Pagination query parameters, kept as raw strings so a non-numeric
/// value degrades to 0 (and from there to the engine's defaults) instead
/// of rejecting the request.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        parse_or_zero(self.limit.as_deref())
    }

    pub fn offset(&self) -> i64 {
        parse_or_zero(self.offset.as_deref())
    }
}

fn parse_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok()).unwrap_or(0)
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

//! CRUD handlers for `/cars`.
//!
//! Handlers only decode the wire shape, hand off to the service, and map
//! taxonomy errors to status codes. Storage detail is logged here and
//! never serialized into a response body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::{Car, CarError};
use crate::transport::http::types::{AppState, ErrorBody, ListQuery, UpdateCarRequest};

fn error_response(err: CarError) -> Response {
    let (status, message) = match err {
        CarError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        // Duplicate ids ride the create path's catch-all 500, same as any
        // other non-validation create failure. The message still names the
        // collision so the client can tell it apart from a storage fault.
        CarError::DuplicateId => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        CarError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
        CarError::Storage { op, cause } => {
            tracing::error!(op, error = %cause, "storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal storage error".to_string(),
            )
        }
    };
    (status, Json(ErrorBody { error: message })).into_response()
}

fn bad_body(rejection: JsonRejection) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: format!("Invalid JSON body: {}", rejection),
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/cars",
    request_body = Car,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 422, description = "Invalid JSON body", body = ErrorBody),
        (status = 500, description = "Duplicate id or storage failure", body = ErrorBody)
    )
)]
pub async fn create_car_handler(
    State(state): State<AppState>,
    body: Result<Json<Car>, JsonRejection>,
) -> Response {
    let Json(input) = match body {
        Ok(v) => v,
        Err(e) => return bad_body(e),
    };
    match state.car_service.create(input).await {
        Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/cars/{id}",
    params(("id" = String, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car found", body = Car),
        (status = 404, description = "No such car", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_car_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.car_service.get_by_id(&id).await {
        Ok(car) => (StatusCode::OK, Json(car)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/cars",
    params(
        ("limit" = Option<String>, Query, description = "Page size; non-numeric or missing means default (10), capped at 100"),
        ("offset" = Option<String>, Query, description = "Rows to skip; non-numeric, missing or negative means 0")
    ),
    responses(
        (status = 200, description = "Page of cars ordered by id", body = Vec<Car>),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_cars_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state
        .car_service
        .list(query.limit(), query.offset())
        .await
    {
        Ok(cars) => (StatusCode::OK, Json(cars)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Applies a sparse patch to a car.
///
/// Routed from both PUT and PATCH /cars/{id}; both carry the same merge
/// semantics (absent fields stay untouched).
#[utoipa::path(
    patch,
    path = "/cars/{id}",
    params(("id" = String, Path, description = "Car id")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Merged car", body = Car),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 404, description = "No such car", body = ErrorBody),
        (status = 422, description = "Invalid JSON body", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn update_car_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateCarRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(v) => v,
        Err(e) => return bad_body(e),
    };
    match state.car_service.update(&id, request.into()).await {
        Ok(car) => (StatusCode::OK, Json(car)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/cars/{id}",
    params(("id" = String, Path, description = "Car id")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "No such car", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn delete_car_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.car_service.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

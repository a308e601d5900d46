use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use crate::domain::Car;
use crate::transport::http::handlers::{cars, health};
use crate::transport::http::types::{AppState, ErrorBody, HealthResponse, UpdateCarRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        cars::create_car_handler,
        cars::list_cars_handler,
        cars::get_car_handler,
        cars::update_car_handler,
        cars::delete_car_handler
    ),
    components(schemas(Car, UpdateCarRequest, ErrorBody, HealthResponse))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// Builds the route table. PUT and PATCH on `/cars/:id` share one handler;
/// the OpenAPI doc carries the alias in the update operation's description.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/cars",
            get(cars::list_cars_handler).post(cars::create_car_handler),
        )
        .route(
            "/cars/:id",
            get(cars::get_car_handler)
                // PUT and PATCH share the merge semantics: both take a
                // sparse patch and leave absent fields untouched.
                .put(cars::update_car_handler)
                .patch(cars::update_car_handler)
                .delete(cars::delete_car_handler),
        )
        .with_state(app_state)
}

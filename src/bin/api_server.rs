use std::sync::Arc;

use car_registry::infra::config;
use car_registry::transport;
use car_registry::{CarService, PostgresCarStore};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = config::database_url();
    let pool = PgPoolOptions::new()
        .max_connections(config::max_db_connections())
        .connect(&database_url)
        .await?;
    tracing::info!("connected to database");

    let store = PostgresCarStore::new(pool.clone());
    store.init_schema().await?;

    let app_state = transport::http::AppState {
        car_service: Arc::new(CarService::new(Arc::new(store))),
        pool: Some(pool),
    };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let addr = config::listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

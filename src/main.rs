//! DiaCare Backend Server
//!
//! Diabetes health prediction server: loads the food catalog from
//! `dataset/` and the prediction models from `model/`, then serves
//! risk prediction, exercise and food recommendations, nutrition lookup
//! and food image scanning over HTTP.

mod config;
mod dataset;
mod error;
mod handlers;
mod inference;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataset::FoodCatalog;
use inference::PredictorSet;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "diacare_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("DiaCare server starting...");

    // The server is useless without its food data; models may be absent
    // (predictors then answer from their fallbacks).
    let catalog = FoodCatalog::load(&config.data_dir)
        .with_context(|| format!("loading food catalog from {}", config.data_dir.display()))?;
    tracing::info!(
        foods = catalog.foods().len(),
        "Food catalog loaded (limits: {:?})",
        catalog.limits()
    );

    let predictors = PredictorSet::load(&config.model_dir);

    if config.is_production() {
        tracing::info!("Running in production mode");
    }

    let port = config.port;
    let state = AppState {
        config,
        catalog: Arc::new(catalog),
        predictors: Arc::new(predictors),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub catalog: Arc<FoodCatalog>,
    pub predictors: Arc<PredictorSet>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::check))
        .route("/diabetes_predict", post(handlers::diabetes::predict))
        .route("/exercise_recommendation", post(handlers::exercise::recommend))
        .route("/food_recommendation", post(handlers::food::recommend))
        .route("/scan-food", post(handlers::scan::detect))
        .route("/food_nutritions", post(handlers::food::nutritions))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::io::Write;
    use tower::ServiceExt;

    fn fixture_state(dir: &std::path::Path) -> AppState {
        let data_dir = dir.join("dataset");
        std::fs::create_dir_all(&data_dir).unwrap();

        let mut nutrition = std::fs::File::create(data_dir.join("nutrition.csv")).unwrap();
        writeln!(nutrition, "id,calories,proteins,fat,carbohydrate,name,image").unwrap();
        writeln!(nutrition, "1,280,9.2,28.4,0,Abon,https://img/abon.jpg").unwrap();
        writeln!(nutrition, "2,51,1,0.3,11.3,Apel,https://img/apel.jpg").unwrap();

        let mut reference =
            std::fs::File::create(data_dir.join("diabet_food_recomendation_clean.csv")).unwrap();
        writeln!(reference, "Name,Calories,Protein,Fat,Carbohydrates").unwrap();
        writeln!(reference, "Oatmeal,150,5,3,27").unwrap();

        AppState {
            config: config::Config::from_env(),
            catalog: Arc::new(FoodCatalog::load(&data_dir).unwrap()),
            predictors: Arc::new(PredictorSet::load(&dir.join("model"))),
        }
    }

    #[tokio::test]
    async fn index_and_health_respond() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(fixture_state(dir.path()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn predict_route_rejects_empty_body_fields() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(fixture_state(dir.path()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/diabetes_predict")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

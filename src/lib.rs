pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::routes;

pub use error::{AppError, ErrorResponse, ReferenceKind};

// Export logic types
pub use logic::{expand, expand_exercise_classes, expand_workout, normalize_workout_body, validate_references};

// Export all model types
pub use model::*;

// Export store types
pub use store::{DocumentStore, MemoryStore, PostgresStore};

use std::sync::Arc;

use crate::api::ApiKeyGate;
use crate::config::{AppConfig, StoreBackend};

/// Build the full application router around an already constructed store
pub fn build_app<S: DocumentStore + 'static>(store: Arc<S>, config: &AppConfig) -> axum::Router {
    let gate = ApiKeyGate::new(config.auth.api_key.clone());
    if gate.is_enabled() {
        log::info!("API key required on resource routes");
    }
    routes::create_router::<S>(gate).with_state(store)
}

/// Load configuration, construct the configured store and serve until shutdown
pub async fn run_server() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Default to Info, keep sqlx quiet unless RUST_LOG says otherwise
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,sqlx=warn"),
    )
    .try_init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={} backend={:?}",
        config.server_address(),
        config.database.backend
    );

    match config.database.backend {
        StoreBackend::Memory => {
            log::warn!("Using in-memory store; data is lost on restart");
            serve_with_store(Arc::new(MemoryStore::new()), &config).await
        }
        StoreBackend::Postgres => {
            log::info!("Connecting to PostgreSQL...");
            let postgres_store =
                PostgresStore::new(&config.database_url()?, config.max_connections()).await?;
            log::info!("Running database migrations...");
            postgres_store.migrate().await?;
            serve_with_store(Arc::new(postgres_store), &config).await
        }
    }
}

async fn serve_with_store<S: DocumentStore + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        log::info!("Loading seed data...");
        seed::load_seed_data(&*store, &UserContext::default_user()).await?;
    }

    let app = build_app(store, config);

    let bind_address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log::info!("Treino API running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use fitness_coach::api::routes::create_routes;
use fitness_coach::config::{AppConfig, DatabaseConfig, StoreBackend};
use fitness_coach::store::{InMemoryContentStore, PgContentStore, SharedStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store: SharedStore = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = db_config.create_pool().await?;
            let store = PgContentStore::new(pool);
            store.run_migrations().await?;
            info!("Connected to PostgreSQL and applied migrations");
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart and the catalog starts empty");
            Arc::new(InMemoryContentStore::new())
        }
    };

    let app = create_routes(store, config.bcrypt_cost);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!(environment = %config.environment, "Fitness coach server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}

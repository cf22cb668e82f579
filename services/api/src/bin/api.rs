//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{DataFiles, JsonFileAdapter, MemorySessionStore},
    config::Config,
    error::ApiError,
    web::{router, AppState, DOCS_PATH},
};
use std::{sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Stores ---
    info!("Serving records from {}", config.data_dir.display());
    let store = Arc::new(JsonFileAdapter::new(DataFiles::in_dir(&config.data_dir)));
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl));
    if let Some(ttl) = config.session_ttl {
        let period = ttl.clamp(Duration::from_secs(1), MAX_SWEEP_PERIOD);
        let _sweep = sessions.clone().spawn_expiry_sweep(period);
        info!("Purging expired sessions every {:?}", period);
    }

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), store, sessions)?);

    // --- 4. Create the Web Router ---
    let app = router(app_state);

    // --- 5. Start the Server ---
    info!("Server running at http://{}/", config.bind_address);
    info!(
        "Swagger UI available at http://{}{}",
        config.bind_address, DOCS_PATH
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Recetario Stock Service - Server binary

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recetario_backend::{create_app, store::Store, store::StoreHandle, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recetario_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Recetario Stock Service");
    tracing::info!("Environment: {}", config.environment);

    // Load persisted state, or start empty on first run
    let data_file = config.storage.data_file.as_ref().map(PathBuf::from);
    let store = match &data_file {
        Some(path) => Store::load_or_default(path),
        None => Store::default(),
    };
    tracing::info!(
        doctors = store.doctors.len(),
        orders = store.orders.len(),
        movements = store.logs.len(),
        "State loaded"
    );

    // Create application state
    let state = AppState {
        store: StoreHandle::new(store, data_file),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

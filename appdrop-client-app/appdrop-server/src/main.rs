use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};

use appdrop_api::{build_router, AppState};
use appdrop_core::repositories::InMemoryTenantRepository;
use appdrop_infrastructure::database::{connection, PgTenantRepository};
use appdrop_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    appdrop_shared::telemetry::init_telemetry();

    info!("APPDROP server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Create App State over the configured brand directory
    let state = match config.database.url.as_deref() {
        Some(url) => {
            info!("Connecting to database...");
            let pool = connection::create_pool(url, &config.database).await?;
            connection::ensure_schema(&pool).await?;
            info!("Database connection established.");
            AppState::from_config(&config, Arc::new(PgTenantRepository::new(pool)))?
        }
        None => {
            warn!("DATABASE_URL not set; brands are kept in memory and lost on restart");
            AppState::from_config(&config, Arc::new(InMemoryTenantRepository::new()))?
        }
    };

    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

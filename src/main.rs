use std::net::SocketAddr;
use storefront::bootstrap;
use storefront::config::Config;
use storefront::infrastructure::http::router::build_router;
use storefront::infrastructure::observability;
use storefront::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing and metrics
    let _observability = observability::init(&config)?;
    tracing::info!("Configuration loaded");

    // Initialize database connection
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    if let Err(e) = bootstrap::initialize_store(&db, &config).await {
        tracing::error!("Failed to initialize store record: {}", e);
        return Err(e.into());
    }

    let state = bootstrap::build_app_state(db, &config).await?;
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

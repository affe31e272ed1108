//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered
//! by the auth and cafe crates.

use api::build_app;
use api::config::ApiConfig;
use auth::SqliteAuthRepository;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,cafe=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    let auth_store_for_cleanup = SqliteAuthRepository::new(pool.clone());
    match auth_store_for_cleanup.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(
                sessions_deleted = sessions,
                "Auth session cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth session cleanup failed, continuing anyway"
            );
        }
    }

    // Build router
    let app = build_app(pool, config.auth);

    // Start server
    tracing::info!("Listening on {}", config.listen_addr);

    let listener = TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use podcast_api::api::{app, AppState};
use podcast_api::config::Config;
use podcast_api::infrastructure::mailer::Mailer;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing, filtered by RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database connected successfully");

    let mailer = Mailer::from_config(&config.mailer).expect("Invalid mailer configuration");
    if let Some(mailer) = &mailer {
        match mailer.verify().await {
            Ok(()) => tracing::info!("Mailer ready, sending as {}", mailer.from_address()),
            Err(e) => tracing::warn!("Mailer unavailable: {}", e),
        }
    }

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let state = AppState::postgres(pool, config);
    let app = app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server failed");
}

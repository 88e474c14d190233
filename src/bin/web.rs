use anyhow::{Context, Result};
use futbol_hoy::config::AppConfig;
use futbol_hoy::{build_service, web};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let service = Arc::new(build_service(&config));

    // Warm the cache so the first page load doesn't wait on the upstream
    let matches = service.get_today_matches().await;
    info!(count = matches.len(), "Initial match list loaded");

    let app = web::router(service);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    println!("\nStarting web server at http://{}", config.bind_addr);
    println!("Press Ctrl+C to stop\n");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

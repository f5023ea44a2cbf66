use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sdg_explorers::config::AppConfig;
use sdg_explorers::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG wins; otherwise info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let addr = config.socket_addr()?;

    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state, &config);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/**
 * ScoutLink Server Entry Point
 *
 * Loads `.env`, reads the configuration, initializes tracing and serves the
 * Axum application.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let config = scoutlink::shared::AppConfig::load()?;

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Tracing initialized with filter {}", env_filter);
    if config.jwt_secret == scoutlink::shared::config::DEV_JWT_SECRET {
        tracing::warn!("[STARTUP] JWT_SECRET not set, using the development secret");
    }

    let port = config.server_port;
    let app = scoutlink::backend::server::init::create_app(config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin scoutlink-server --features ssr");
    std::process::exit(1);
}

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8090".to_string());
    let token = std::env::var("TOKEN").unwrap_or_else(|_| {
        warn!("TOKEN not set, accepting the development token");
        "dev-token".to_string()
    });
    let zones = std::env::var("ZONES").unwrap_or_else(|_| "example.com".to_string());
    let zones = zones
        .split(',')
        .map(str::trim)
        .filter(|z| !z.is_empty())
        .map(str::to_string);

    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    mock_server::run(listener, mock_server::app_with_zones(&token, zones)).await
}

use std::sync::Arc;

use anyhow::Result;
use axum::{Router, serve};
use dotenvy::dotenv;
use rmcp::transport::{
    StreamableHttpServerConfig, StreamableHttpService,
    streamable_http_server::session::local::LocalSessionManager,
};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vacay::auth::TokenVerifier;
use vacay::config::Config;
use vacay::db::init_db;
use vacay::mcp::VacationTools;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let pool = init_db(&config.database_url).await;
    let verifier = Arc::new(TokenVerifier::from_config(&config).await?);

    info!("Setting up the streamable HTTP MCP service");
    let service = StreamableHttpService::new(
        move || Ok(VacationTools::new(pool.clone(), verifier.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    info!("Starting MCP server on {}", config.mcp_addr);
    let router = Router::new().nest_service("/mcp", service);
    let tcp_listener = TcpListener::bind(&config.mcp_addr).await?;

    // Graceful shutdown on CTRL+C
    let shutdown = async {
        signal::ctrl_c().await.unwrap_or_else(|e| {
            eprintln!("failed to install CTRL+C handler: {e}");
        });
    };

    serve(tcp_listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

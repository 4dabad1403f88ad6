use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use oura_backend::{config::Config, routes::app_router, AppState};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env first so RUST_LOG can come from it.
    let config = Config::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let addr: SocketAddr = config
        .server_address
        .parse()
        .with_context(|| format!("invalid SERVER_ADDRESS {}", config.server_address))?;

    if config.oauth.client_id.is_none() {
        tracing::warn!("OURA_CLIENT_ID is not set; /auth/login will fail until it is configured");
    }
    info!(
        environment = ?config.environment,
        api_base_url = %config.api_base_url,
        "Oura upstream selected"
    );

    let cors = cors_layer(&config)?;
    let app = app_router(AppState::new(config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Ok(match &config.frontend_origin {
        // Credentials cannot be combined with a wildcard origin.
        None => cors.allow_origin(Any),
        Some(origin) => cors
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid FRONTEND_ORIGIN {origin}"))?,
            )
            .allow_credentials(true),
    })
}

use std::sync::Arc;

use anyhow::Context;
use cinescope_server::config::ServerConfig;
use cinescope_tmdb::{MovieSource, TmdbClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    info!(db_path = %config.db_path, "connecting to database");
    let pool = cinescope_db::connect(&config.db_path)
        .await
        .context("failed to connect to database")?;

    // Run migrations
    cinescope_db::migrate::run(&pool)
        .await
        .context("failed to run migrations")?;
    info!("migrations complete");

    let client = TmdbClient::new(config.tmdb.clone());
    info!(base_url = %client.base_url(), region = %config.region, "TMDB client ready");
    let source: Arc<dyn MovieSource> = Arc::new(client);

    let app_state = cinescope_server::state::AppState::new(
        pool,
        source,
        config.region.clone(),
        config.search_delay,
    )
    .await;
    let browse = app_state.browse.clone();

    let app = cinescope_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;

    browse.shutdown().await;
    Ok(())
}

mod api;
mod ingest;
mod middleware;

use std::time::Duration;

use dealerdb_sentiment::SentimentClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = dealerdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = dealerdb_db::PoolConfig::from_app_config(&config);
    let pool = dealerdb_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = dealerdb_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");

    let sentiment = SentimentClient::with_timeout(
        &config.sentiment_url,
        Duration::from_secs(config.sentiment_timeout_secs),
    )?;
    tracing::info!(
        endpoint = %sentiment.endpoint(),
        timeout_secs = config.sentiment_timeout_secs,
        "sentiment service configured"
    );

    let app = build_app(AppState { pool, sentiment }, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "dealerdb server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

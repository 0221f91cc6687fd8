use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool, DbConfig as DbPoolConfig};
use joke_service::config::LogFormat;
use joke_service::db::PgJokeSource;
use joke_service::services::JokeService;
use joke_service::{handlers, Config, SERVICE_NAME};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Container healthcheck: `joke-service healthcheck` probes the local HTTP endpoint
async fn run_healthcheck() -> anyhow::Result<()> {
    let port = std::env::var("JOKE_SERVICE_PORT").unwrap_or_else(|_| "8080".to_string());
    let url = format!("http://127.0.0.1:{}/api/v1/health", port);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("healthcheck request to {} failed", url))?;

    anyhow::ensure!(
        resp.status().is_success(),
        "healthcheck HTTP status: {}",
        resp.status()
    );
    Ok(())
}

/// Joke Service
///
/// Serves the joke list from PostgreSQL behind an in-memory cache with
/// bounded retries and stale fallback.
///
/// Runs on port 8080 (configurable via JOKE_SERVICE_PORT env var).
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if let Some(cmd) = std::env::args().nth(1) {
        if cmd == "healthcheck" || cmd == "healthcheck-http" {
            return run_healthcheck().await;
        }
    }

    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env()
        .map_err(anyhow::Error::msg)
        .context("Failed to load configuration")?;

    init_tracing(config.logging.format);

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let mut db_cfg = DbPoolConfig::from_env_or_url(SERVICE_NAME, &config.database.url);
    db_cfg.max_connections = config.database.max_connections;
    db_cfg.log_config();

    let db_pool = create_pool(db_cfg)
        .await
        .context("Failed to create database pool")?;

    let source = Arc::new(PgJokeSource::new(db_pool.clone(), SERVICE_NAME));
    let joke_service = web::Data::new(JokeService::new(source, &config.jokes));

    tracing::info!(
        ttl_secs = config.jokes.cache_ttl_secs,
        attempts = config.jokes.fetch_attempts,
        retry_delay_ms = config.jokes.retry_delay_ms,
        max_staleness_secs = ?config.jokes.max_staleness_secs,
        "Joke read path configured"
    );

    let bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(joke_service.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    db_pool.close().await;
    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}

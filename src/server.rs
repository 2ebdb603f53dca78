//! HTTP server initialization and runtime setup.
//!
//! Handles the database wait loop, migrations, cache setup, and the Axum server
//! lifecycle.

use crate::config::{CacheBackend, Config, mask_connection_string};
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (waiting for the database to come up)
/// - Apply migrations
/// - Cache backend
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The database stays unreachable for every startup attempt
/// - Migrations fail
/// - Redis is selected but unreachable
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let cache = build_cache(&config).await?;

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let state = AppState::new(repository, cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to PostgreSQL, retrying at a fixed interval until the database
/// accepts connections.
///
/// Makes at most `db_connect_retries` attempts, `db_connect_retry_delay`
/// seconds apart.
///
/// # Errors
///
/// Returns the last connection error once every attempt has failed.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout));

    let database_url = config.database_url.clone();

    let pool = retry_startup(startup_strategy(config), || {
        let options = options.clone();
        let database_url = database_url.clone();
        async move { options.connect(&database_url).await }
    })
    .await
    .with_context(|| {
        format!(
            "Could not connect to {} after {} attempts",
            mask_connection_string(&config.database_url),
            config.db_connect_retries
        )
    })?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Delays between startup attempts: `db_connect_retries - 1` waits of
/// `db_connect_retry_delay` seconds.
fn startup_strategy(config: &Config) -> impl Iterator<Item = Duration> + use<> {
    FixedInterval::new(Duration::from_secs(config.db_connect_retry_delay))
        .take(config.db_connect_retries.saturating_sub(1))
}

/// Runs `connect` once, then once more after each delay in `strategy`,
/// stopping at the first success.
async fn retry_startup<T, E, F, Fut>(
    strategy: impl IntoIterator<Item = Duration>,
    mut connect: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0usize;

    Retry::start(strategy, || {
        attempt += 1;
        let current = attempt;
        let fut = connect();
        async move {
            fut.await.inspect_err(|e| {
                tracing::warn!(attempt = current, error = %e, "Waiting for database");
            })
        }
    })
    .await
}

/// Builds the configured cache backend.
///
/// # Errors
///
/// Returns an error if Redis is selected but cannot be reached. A configured
/// cache that is down at startup is fatal rather than silently degraded.
pub async fn build_cache(config: &Config) -> Result<Arc<dyn CacheService>> {
    let cache: Arc<dyn CacheService> = match config.cache_backend {
        CacheBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("CACHE_BACKEND=redis requires REDIS_URL or REDIS_HOST")?;
            let redis = RedisCache::connect(redis_url, config.cache_key_prefix.clone())
                .await
                .context("Redis cache unavailable")?;
            Arc::new(redis)
        }
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::None => Arc::new(NullCache::new()),
    };

    tracing::info!(backend = cache.backend(), "Cache ready");
    Ok(cache)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

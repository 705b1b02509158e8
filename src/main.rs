//! Product Cache - product catalog API server
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load and validate configuration from environment variables
//! 3. Open the durable store (sled or in-memory) and seed it if empty
//! 4. Build the cache store (Redis or in-memory with its TTL sweep)
//! 5. Serve the Axum router until SIGINT/SIGTERM
//! 6. Stop the sweep, release the cache and flush the store

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use product_cache::api::{create_router, AppState};
use product_cache::cache::{CacheStore, MemoryCache, RedisCache};
use product_cache::config::{CacheBackendKind, Config};
use product_cache::service::{CacheSettings, ProductCacheService};
use product_cache::spawn_cleanup_task;
use product_cache::store::{seed_if_empty, MemoryStore, ProductStore, SledStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "product_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Product Cache API");

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: port={}, cache_enabled={}, backend={:?}, ttl={}s, cache_timeout={}ms, store_timeout={}ms",
        config.server_port,
        config.cache_enabled,
        config.cache_backend,
        config.cache_ttl.as_secs(),
        config.cache_timeout.as_millis(),
        config.store_timeout.as_millis()
    );

    let store: Arc<dyn ProductStore> = match &config.database_path {
        Some(path) => Arc::new(SledStore::open(path).context("failed to open product store")?),
        None => {
            warn!("DATABASE_PATH not set, products are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    if config.seed_data {
        if let Err(e) = seed_if_empty(store.as_ref()).await {
            error!(error = %e, "Seeding sample products failed");
        }
    }

    let (cache, cleanup_handle): (Arc<dyn CacheStore>, Option<JoinHandle<()>>) =
        match config.cache_backend {
            CacheBackendKind::Memory => {
                let cache = MemoryCache::new(config.cache_max_entries, config.cache_timeout);
                let handle = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
                let cache: Arc<dyn CacheStore> = Arc::new(cache);
                (cache, Some(handle))
            }
            CacheBackendKind::Redis => {
                let cache = RedisCache::new(&config.redis_url, config.cache_timeout)
                    .context("invalid REDIS_URL")?;
                let cache: Arc<dyn CacheStore> = Arc::new(cache);
                (cache, None)
            }
        };

    if config.cache_enabled && !cache.ping().await {
        warn!("Cache is not reachable, serving from the store until it recovers");
    }

    let service = ProductCacheService::new(store, cache, CacheSettings::from_config(&config));
    let state = AppState::new(service);
    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    state
        .service
        .close()
        .await
        .context("failed to flush product store")?;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}

use std::sync::Arc;
use std::time::Duration;

use streamvault_core::cache::TtlCache;

use crate::config::ServerConfig;
use crate::mail::Mailer;

/// Cached analytics payloads, keyed by report name.
pub type ReportCache = TtlCache<serde_json::Value>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: streamvault_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub cache: Arc<ReportCache>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    pub fn new(pool: streamvault_db::DbPool, config: ServerConfig) -> Self {
        let cache = if config.cache_enabled {
            TtlCache::new(Duration::from_secs(config.cache_ttl_secs))
        } else {
            TtlCache::disabled()
        };
        let mailer = Mailer::new(config.email.clone());

        Self {
            pool,
            config: Arc::new(config),
            cache: Arc::new(cache),
            mailer: Arc::new(mailer),
        }
    }
}

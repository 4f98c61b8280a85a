// --- File: crates/services/market_backend/src/app_state.rs ---
//! Shared application state assembled once at startup.

use market_common::services::ServiceFactory;
use market_config::AppConfig;
use market_db::{DbClient, SqlMarketRepositories};
use std::sync::Arc;

use crate::service_factory::MarketServiceFactory;

/// Everything the routers need, built once in `main` and shared.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repos: SqlMarketRepositories,
    pub service_factory: Arc<dyn ServiceFactory>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, db_client: DbClient) -> Self {
        let repos = SqlMarketRepositories::new(db_client);
        let service_factory = Arc::new(MarketServiceFactory::new(config.clone()));
        Self {
            config,
            repos,
            service_factory,
        }
    }
}

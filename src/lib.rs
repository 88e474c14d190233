pub mod api;
pub mod config;
pub mod models;
pub mod service;
pub mod utils;
pub mod web;

pub use api::*;
pub use models::*;
pub use utils::*;

use api::ApiFootballClient;
use config::AppConfig;
use models::Match;
use service::MatchService;
use std::sync::Arc;
use utils::cache::MemoryCache;
use utils::clock::{Clock, SystemClock};

/// Wire the live API client, an in-memory cache and the system clock together
pub fn build_service(config: &AppConfig) -> MatchService<ApiFootballClient> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = Arc::new(MemoryCache::<Vec<Match>>::new(clock.clone()));
    let client = ApiFootballClient::with_endpoint(
        config.api_key.clone(),
        &config.api_base_url,
        &config.api_host,
    );

    MatchService::new(client, cache, clock)
        .with_offset(config.utc_offset)
        .with_ttl(config.cache_ttl)
}

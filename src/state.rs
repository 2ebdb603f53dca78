//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUrlRepository;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService<PgUrlRepository>>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Wires the mapping service over an already-connected store and cache.
    pub fn new(repository: Arc<PgUrlRepository>, cache: Arc<dyn CacheService>) -> Self {
        let mapping_service = Arc::new(MappingService::new(repository, cache.clone()));
        Self {
            mapping_service,
            cache,
        }
    }
}

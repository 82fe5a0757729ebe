use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable store. Default: InMemoryStore.
    pub store: Arc<dyn ResumeStore>,
    /// Vocabularies and tuning constants, fixed at startup.
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

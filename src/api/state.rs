use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::providers::StyleClassifier;
use crate::services::repository::{ItemStore, RecommendationStore};
use crate::services::studio::DesignStudio;

/// Shared application state
///
/// The classifier and studio are injected at construction rather than
/// reached through process-wide globals, so tests can swap in stubs.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub classifier: Arc<dyn StyleClassifier>,
    pub studio: Arc<DesignStudio>,
    pub api_token: String,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub items: ItemStore,
    pub recommendations: RecommendationStore,
}

impl AppState {
    /// Creates application state with empty stores
    pub fn new(
        classifier: Arc<dyn StyleClassifier>,
        studio: Arc<DesignStudio>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                items: ItemStore::new(),
                recommendations: RecommendationStore::new(),
            })),
            classifier,
            studio,
            api_token: api_token.into(),
        }
    }
}

use axum::extract::FromRef;

use crate::settings::Settings;
use crate::store::CafeStore;
use crate::views::Views;

/// Router state: the explicitly constructed collaborators every handler
/// draws from. Cloning is cheap (pool handle + shared template set).
#[derive(Clone)]
pub struct AppState {
    pub store: CafeStore,
    pub views: Views,
}

impl AppState {
    pub fn new(store: CafeStore, views: Views) -> Self {
        Self { store, views }
    }

    /// Open the database, create the schema if needed and compile templates.
    pub async fn build(settings: &Settings) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let store =
            CafeStore::connect(&settings.database.url, settings.database.connections).await?;
        let views = Views::new(&settings.app_name)?;
        tracing::info!(database = %settings.database.url, "application state ready");
        Ok(Self::new(store, views))
    }
}

impl FromRef<AppState> for CafeStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Views {
    fn from_ref(state: &AppState) -> Self {
        state.views.clone()
    }
}

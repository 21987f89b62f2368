use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    auth::providers::AuthProviders, config::AppConfig, page_cache::PageCache,
    services::pokedex_service::PokedexClient,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub auth_providers: AuthProviders,
    pub pages: PageCache,
    pub pokedex: PokedexClient,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        auth_providers: AuthProviders,
        pages: PageCache,
        pokedex: PokedexClient,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            auth_providers,
            pages,
            pokedex,
        })
    }
}

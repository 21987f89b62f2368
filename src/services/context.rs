use sea_orm::DatabaseConnection;

use crate::{
    auth::providers::AuthProviders,
    db::dao::{AccountDao, DaoContext, SessionDao},
    page_cache::PageCache,
    services::{
        auth_service::AuthService,
        resource_service::ResourceService,
        resources::{
            FoodService, NoteResource, PhotoResource, PokemonReviewResource, TodoResource,
        },
        user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    pages: PageCache,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self::with_pages(db, PageCache::new())
    }

    pub fn with_pages(db: &DatabaseConnection, pages: PageCache) -> Self {
        Self {
            daos: DaoContext::new(db),
            pages,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::with_pages(&state.db, state.pages.clone())
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn auth<'a>(&'a self, providers: &'a AuthProviders) -> AuthService<'a> {
        AuthService::new(providers, &self.pages)
    }

    pub fn todos(&self) -> ResourceService<TodoResource> {
        ResourceService::new(self.daos.todo(), self.pages.clone())
    }

    pub fn photos(&self) -> ResourceService<PhotoResource> {
        ResourceService::new(self.daos.photo(), self.pages.clone())
    }

    pub fn food(&self) -> FoodService {
        FoodService::new(
            ResourceService::new(self.daos.food_photo(), self.pages.clone()),
            ResourceService::new(self.daos.food_review(), self.pages.clone()),
        )
    }

    pub fn pokemon_reviews(&self) -> ResourceService<PokemonReviewResource> {
        ResourceService::new(self.daos.pokemon_review(), self.pages.clone())
    }

    pub fn notes(&self) -> ResourceService<NoteResource> {
        ResourceService::new(self.daos.note(), self.pages.clone())
    }

    pub fn session_dao(&self) -> SessionDao {
        self.daos.session()
    }

    pub fn account_dao(&self) -> AccountDao {
        self.daos.account()
    }
}

use sea_orm::DatabaseConnection;

use super::{
    AccountDao, DaoBase, FoodPhotoDao, FoodReviewDao, NoteDao, PhotoDao, PokemonReviewDao,
    SessionDao, TodoDao, UserDao,
};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn session(&self) -> SessionDao {
        DaoBase::new(&self.db)
    }

    pub fn account(&self) -> AccountDao {
        AccountDao::new(&self.db)
    }

    pub fn todo(&self) -> TodoDao {
        DaoBase::new(&self.db)
    }

    pub fn photo(&self) -> PhotoDao {
        DaoBase::new(&self.db)
    }

    pub fn food_photo(&self) -> FoodPhotoDao {
        DaoBase::new(&self.db)
    }

    pub fn food_review(&self) -> FoodReviewDao {
        DaoBase::new(&self.db)
    }

    pub fn pokemon_review(&self) -> PokemonReviewDao {
        DaoBase::new(&self.db)
    }

    pub fn note(&self) -> NoteDao {
        DaoBase::new(&self.db)
    }
}

use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::pokemon_review::{self, Entity as PokemonReview};

#[derive(Clone)]
pub struct PokemonReviewDao {
    db: DatabaseConnection,
}

impl DaoBase for PokemonReviewDao {
    type Entity = PokemonReview;
    type Model = pokemon_review::Model;
    type ActiveModel = pokemon_review::ActiveModel;
    type Column = pokemon_review::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

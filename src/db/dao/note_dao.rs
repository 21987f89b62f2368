use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::note::{self, Entity as Note};

#[derive(Clone)]
pub struct NoteDao {
    db: DatabaseConnection,
}

impl DaoBase for NoteDao {
    type Entity = Note;
    type Model = note::Model;
    type ActiveModel = note::ActiveModel;
    type Column = note::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

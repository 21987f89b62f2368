use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::todo::{self, Entity as Todo};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    type Model = todo::Model;
    type ActiveModel = todo::ActiveModel;
    type Column = todo::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

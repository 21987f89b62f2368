use sea_orm::DatabaseConnection;

use super::DaoBase;
use crate::db::entities::photo::{self, Entity as Photo};

#[derive(Clone)]
pub struct PhotoDao {
    db: DatabaseConnection,
}

impl DaoBase for PhotoDao {
    type Entity = Photo;
    type Model = photo::Model;
    type ActiveModel = photo::ActiveModel;
    type Column = photo::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

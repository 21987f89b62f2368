use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult, base::delete_matching};
use crate::db::entities::{
    food_photo::{self, Entity as FoodPhoto},
    food_review::{self, Entity as FoodReview},
};

#[derive(Clone)]
pub struct FoodPhotoDao {
    db: DatabaseConnection,
}

impl DaoBase for FoodPhotoDao {
    type Entity = FoodPhoto;
    type Model = food_photo::Model;
    type ActiveModel = food_photo::ActiveModel;
    type Column = food_photo::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl FoodPhotoDao {
    pub async fn find_owned(&self, owner: Uuid, id: Uuid) -> DaoResult<Option<food_photo::Model>> {
        Ok(FoodPhoto::find()
            .filter(owned_photo(owner, id))
            .one(&self.db)
            .await?)
    }

    /// Deletes the photo and every review pointing at it in one transaction.
    /// Returns the number of photo rows removed; zero when `owner` does not own it.
    pub async fn delete_with_reviews(&self, owner: Uuid, id: Uuid) -> DaoResult<u64> {
        let txn = self.db.begin().await?;

        let owned = FoodPhoto::find()
            .filter(owned_photo(owner, id))
            .one(&txn)
            .await?;
        if owned.is_none() {
            txn.rollback().await?;
            return Ok(0);
        }

        delete_matching::<FoodReview, _>(
            &txn,
            Condition::all().add(food_review::Column::FoodId.eq(id)),
        )
        .await?;
        let deleted = delete_matching::<FoodPhoto, _>(&txn, owned_photo(owner, id)).await?;

        txn.commit().await?;
        Ok(deleted)
    }
}

fn owned_photo(owner: Uuid, id: Uuid) -> Condition {
    Condition::all()
        .add(food_photo::Column::Id.eq(id))
        .add(food_photo::Column::UserId.eq(owner))
}

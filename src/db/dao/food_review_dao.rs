use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::food_review::{self, Entity as FoodReview};

#[derive(Clone)]
pub struct FoodReviewDao {
    db: DatabaseConnection,
}

impl DaoBase for FoodReviewDao {
    type Entity = FoodReview;
    type Model = food_review::Model;
    type ActiveModel = food_review::ActiveModel;
    type Column = food_review::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl FoodReviewDao {
    /// Reviews by `owner` for any of `food_ids`, newest first.
    pub async fn find_for_foods(
        &self,
        owner: Uuid,
        food_ids: Vec<Uuid>,
    ) -> DaoResult<Vec<food_review::Model>> {
        if food_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_all(None, move |query| {
            query
                .filter(food_review::Column::UserId.eq(owner))
                .filter(food_review::Column::FoodId.is_in(food_ids))
        })
        .await
    }
}

use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

// Reviews point at this table through `food_reviews.food_id`; there is no
// foreign key, child rows are removed by the food photo delete transaction.
#[base_entity(owner = "user_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, DeriveEntityModel)]
#[sea_orm(table_name = "food_photos")]
pub struct Model {
    pub name: String,
    pub image_url: String,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}

use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity(owner = "user_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, DeriveEntityModel)]
#[sea_orm(table_name = "food_reviews")]
pub struct Model {
    #[sea_orm(indexed)]
    pub food_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}

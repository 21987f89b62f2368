use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity(owner = "user_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, DeriveEntityModel)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    pub name: String,
    pub image_url: String,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}

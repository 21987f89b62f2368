use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, EntityTrait,
    TransactionTrait,
};
use uuid::Uuid;

use super::{DaoResult, OwnedEntity, base::delete_matching};
use crate::db::entities::{
    food_photo, food_review, note, photo, pokemon_review, session, todo, user,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub todos: u64,
    pub photos: u64,
    pub food_reviews: u64,
    pub food_photos: u64,
    pub pokemon_reviews: u64,
    pub notes: u64,
    pub sessions: u64,
    pub users: u64,
}

/// Privileged cross-table access used only for account removal.
#[derive(Clone)]
pub struct AccountDao {
    db: DatabaseConnection,
}

impl AccountDao {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// Removes every row owned by `user_id` and then the user itself, atomically.
    pub async fn purge(&self, user_id: Uuid) -> DaoResult<PurgeReport> {
        let txn = self.db.begin().await?;

        let report = PurgeReport {
            todos: delete_owned::<todo::Entity>(&txn, user_id).await?,
            photos: delete_owned::<photo::Entity>(&txn, user_id).await?,
            food_reviews: delete_owned::<food_review::Entity>(&txn, user_id).await?,
            food_photos: delete_owned::<food_photo::Entity>(&txn, user_id).await?,
            pokemon_reviews: delete_owned::<pokemon_review::Entity>(&txn, user_id).await?,
            notes: delete_owned::<note::Entity>(&txn, user_id).await?,
            sessions: delete_matching::<session::Entity, _>(
                &txn,
                Condition::all().add(session::Column::UserId.eq(user_id)),
            )
            .await?,
            users: delete_matching::<user::Entity, _>(
                &txn,
                Condition::all().add(user::Column::Id.eq(user_id)),
            )
            .await?,
        };

        txn.commit().await?;
        Ok(report)
    }
}

async fn delete_owned<E>(txn: &DatabaseTransaction, owner: Uuid) -> DaoResult<u64>
where
    E: EntityTrait + OwnedEntity,
{
    delete_matching::<E, _>(txn, Condition::all().add(E::owner_column().eq(owner))).await
}

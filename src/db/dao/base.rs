use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityName, EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait,
    Order,
    QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use super::base_traits::{BaseColumns, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// Shared persistence operations for every table built with `#[base_entity]`.
///
/// The associated types restate the SeaORM relationships between entity,
/// model and active model so generic callers get them as implied bounds.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel, Column = Self::Column>
        + BaseColumns
        + Send
        + Sync;
    type Model: FromQueryResult
        + ModelTrait<Entity = Self::Entity>
        + IntoActiveModel<Self::ActiveModel>
        + Clone
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + Send
        + Sync;
    type Column: ColumnTrait + Copy + Send + Sync;

    fn from_db(db: DatabaseConnection) -> Self;

    fn new(db: &DatabaseConnection) -> Self {
        Self::from_db(db.clone())
    }

    fn db(&self) -> &DatabaseConnection;

    fn table_name() -> &'static str {
        Self::Entity::default().table_name()
    }

    async fn create(&self, active: Self::ActiveModel) -> DaoResult<Self::Model> {
        insert_stamped(self.db(), active).await
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<Self::Model> {
        let model = Self::Entity::find()
            .filter(Self::Entity::id_column().eq(id))
            .one(self.db())
            .await?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::table_name(),
            id,
        })
    }

    async fn find_all<F>(
        &self,
        order: Option<(Self::Column, Order)>,
        apply: F,
    ) -> DaoResult<Vec<Self::Model>>
    where
        F: FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    {
        let filtered = apply(Self::Entity::find());
        let ordered = match order {
            Some((column, order)) => filtered.order_by(column, order),
            None => filtered.order_by_desc(Self::Entity::created_at_column()),
        };
        // equal sort keys keep a stable order across renders
        let ordered = ordered.order_by_desc(Self::Entity::id_column());
        Ok(ordered.all(self.db()).await?)
    }

    /// Writes the set fields of `active` to every row matching `condition`.
    async fn update_where(
        &self,
        condition: Condition,
        mut active: Self::ActiveModel,
    ) -> DaoResult<u64> {
        active.set_updated_at(Utc::now().fixed_offset());
        let result = Self::Entity::update_many()
            .set(active)
            .filter(condition)
            .exec(self.db())
            .await?;
        Ok(result.rows_affected)
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<Self::Model>
    where
        F: for<'a> FnOnce(&'a mut Self::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;
        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());
        Ok(active.update(self.db()).await?)
    }

    async fn delete_where(&self, condition: Condition) -> DaoResult<u64> {
        delete_matching::<Self::Entity, _>(self.db(), condition).await
    }
}

pub(crate) async fn insert_stamped<A, C>(
    db: &C,
    mut active: A,
) -> DaoResult<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + HasIdActiveModel + TimestampedActiveModel + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let now = Utc::now().fixed_offset();
    active.set_id(Uuid::new_v4());
    active.set_created_at(now);
    active.set_updated_at(now);
    Ok(active.insert(db).await?)
}

pub(crate) async fn delete_matching<E, C>(db: &C, condition: Condition) -> DaoResult<u64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::delete_many().filter(condition).exec(db).await?;
    Ok(result.rows_affected)
}

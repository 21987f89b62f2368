use std::marker::PhantomData;

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, ModelTrait, QueryFilter, sea_query::ValueType,
};
use uuid::Uuid;

use crate::{
    context::RequestContext,
    db::dao::{BaseColumns, DaoBase, OwnedActiveModel, OwnedEntity},
    error::AppError,
    forms::{FormFields, ValidationError},
    page_cache::PageCache,
    services::listing::{ListQuery, contains_ci, folds_case_in_sql, matches_ci},
};

pub type EntityOf<R> = <<R as Resource>::Dao as DaoBase>::Entity;
pub type ModelOf<R> = <<R as Resource>::Dao as DaoBase>::Model;
pub type ActiveModelOf<R> = <<R as Resource>::Dao as DaoBase>::ActiveModel;
pub type ColumnOf<R> = <<R as Resource>::Dao as DaoBase>::Column;

/// Describes one user-owned record type: where it lives, how its forms parse
/// and which page shows it.
pub trait Resource: Send + Sync + 'static {
    type Dao: DaoBase<Entity: OwnedEntity, ActiveModel: OwnedActiveModel + Default>;
    type Draft: Send;
    type Patch: Send;

    /// Page whose cached renders go stale when a row changes.
    const PAGE: &'static str;
    /// Rejection for an update without an id or with missing fields.
    const MISSING_UPDATE: &'static str;
    /// Rejection for a delete without an id.
    const MISSING_ID: &'static str;

    fn parse_create(fields: &FormFields) -> Result<Self::Draft, ValidationError>;
    fn parse_update(fields: &FormFields) -> Result<Self::Patch, ValidationError>;

    fn create_model(draft: Self::Draft) -> ActiveModelOf<Self>;
    fn update_model(patch: Self::Patch) -> ActiveModelOf<Self>;

    /// Column behind the `name_*` sort keys.
    fn name_column() -> ColumnOf<Self>;

    /// Column matched by the free-text filter; `None` disables filtering.
    fn search_column() -> Option<ColumnOf<Self>> {
        None
    }
}

/// Result of a form action. Rejections carry the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub affected: u64,
}

impl ActionOutcome {
    pub fn done(affected: u64) -> Self {
        Self {
            success: true,
            message: None,
            affected,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            affected: 0,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl From<ValidationError> for ActionOutcome {
    fn from(err: ValidationError) -> Self {
        Self::rejected(err.message())
    }
}

/// The row `id` as long as it belongs to `owner`.
pub fn owned_row<R: Resource>(id: Uuid, owner: Uuid) -> Condition {
    Condition::all()
        .add(EntityOf::<R>::id_column().eq(id))
        .add(EntityOf::<R>::owner_column().eq(owner))
}

/// Create, update, delete and list for one resource, always scoped to the
/// caller. Every action validates first, then requires an identity, then
/// persists, then drops the cached page.
pub struct ResourceService<R: Resource> {
    dao: R::Dao,
    pages: PageCache,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            dao: self.dao.clone(),
            pages: self.pages.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(dao: R::Dao, pages: PageCache) -> Self {
        Self {
            dao,
            pages,
            _resource: PhantomData,
        }
    }

    pub fn dao(&self) -> &R::Dao {
        &self.dao
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let draft = match R::parse_create(fields) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(rejection.into()),
        };
        let owner = ctx.require_identity()?.user_id;
        self.insert(owner, R::create_model(draft)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let parsed = fields
            .id("id", R::MISSING_UPDATE)
            .and_then(|id| Ok((id, R::parse_update(fields)?)));
        let (id, patch) = match parsed {
            Ok(parsed) => parsed,
            Err(rejection) => return Ok(rejection.into()),
        };
        let owner = ctx.require_identity()?.user_id;
        self.apply(id, owner, R::update_model(patch)).await
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let id = match fields.id("id", R::MISSING_ID) {
            Ok(id) => id,
            Err(rejection) => return Ok(rejection.into()),
        };
        let owner = ctx.require_identity()?.user_id;
        let affected = self.dao.delete_where(owned_row::<R>(id, owner)).await?;
        self.invalidate().await;
        Ok(ActionOutcome::done(affected))
    }

    /// Rows owned by the caller, filtered and sorted as the page asked.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Vec<ModelOf<R>>, AppError> {
        let owner = ctx.require_identity()?.user_id;
        let search = R::search_column().zip(query.search().map(str::to_string));
        let in_sql = folds_case_in_sql(self.dao.db().get_database_backend());
        let order = query
            .sort
            .order(R::name_column(), EntityOf::<R>::created_at_column());

        let sql_search = search.clone().filter(|_| in_sql);
        let mut rows = self
            .dao
            .find_all(Some(order), move |select| {
                let select = select.filter(EntityOf::<R>::owner_column().eq(owner));
                match sql_search {
                    Some((column, needle)) => select.filter(contains_ci(column, &needle)),
                    None => select,
                }
            })
            .await?;

        if let Some((column, needle)) = search.filter(|_| !in_sql) {
            rows.retain(|row| {
                <String as ValueType>::try_from(row.get(column))
                    .is_ok_and(|name| matches_ci(&name, &needle))
            });
        }
        Ok(rows)
    }

    pub(crate) async fn insert(
        &self,
        owner: Uuid,
        mut active: ActiveModelOf<R>,
    ) -> Result<ActionOutcome, AppError> {
        active.set_owner(owner);
        self.dao.create(active).await?;
        self.invalidate().await;
        Ok(ActionOutcome::done(1))
    }

    /// Writes `active` to row `id` only when `owner` owns it; a foreign id
    /// touches nothing and still succeeds.
    pub(crate) async fn apply(
        &self,
        id: Uuid,
        owner: Uuid,
        active: ActiveModelOf<R>,
    ) -> Result<ActionOutcome, AppError> {
        let affected = self
            .dao
            .update_where(owned_row::<R>(id, owner), active)
            .await?;
        self.invalidate().await;
        Ok(ActionOutcome::done(affected))
    }

    pub(crate) async fn invalidate(&self) {
        self.pages.invalidate(R::PAGE).await;
    }
}

use chrono::{Duration, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::Expr,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::session::{self, Entity as Session};

const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Clone)]
pub struct SessionDao {
    db: DatabaseConnection,
}

impl DaoBase for SessionDao {
    type Entity = Session;
    type Model = session::Model;
    type ActiveModel = session::ActiveModel;
    type Column = session::Column;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SessionDao {
    pub async fn open(&self, user_id: &Uuid, ttl_secs: u64) -> DaoResult<session::Model> {
        let ttl = Duration::seconds(ttl_secs.min(MAX_SESSION_TTL_SECS) as i64);
        let model = session::ActiveModel {
            user_id: Set(*user_id),
            expires_at: Set(Utc::now().fixed_offset() + ttl),
            revoked: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Returns the session only while it is unrevoked, unexpired and owned by `user_id`.
    pub async fn find_active(
        &self,
        session_id: &Uuid,
        user_id: &Uuid,
    ) -> DaoResult<Option<session::Model>> {
        Ok(Session::find()
            .filter(session::Column::Id.eq(*session_id))
            .filter(session::Column::UserId.eq(*user_id))
            .filter(session::Column::Revoked.eq(false))
            .filter(session::Column::ExpiresAt.gt(Utc::now().fixed_offset()))
            .one(&self.db)
            .await?)
    }

    pub async fn revoke(&self, session_id: &Uuid) -> DaoResult<u64> {
        let result = Session::update_many()
            .col_expr(session::Column::Revoked, Expr::value(true))
            .col_expr(session::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(session::Column::Id.eq(*session_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

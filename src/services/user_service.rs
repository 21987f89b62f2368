use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, DaoLayerError, UserDao},
    db::entities::user,
    error::AppError,
};

pub const EMAIL_TAKEN: &str = "An account with this email already exists.";

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<user::Model>, AppError> {
        match self.user_dao.find_by_id(*id).await {
            Ok(model) => Ok(Some(model)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_email(email).await?)
    }

    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<user::Model, AppError> {
        self.user_dao
            .create_user(email, password_hash)
            .await
            .map_err(|err| {
                if err.is_unique_violation() {
                    AppError::conflict(EMAIL_TAKEN)
                } else {
                    err.into()
                }
            })
    }

    pub async fn set_last_sign_in(
        &self,
        user_id: &Uuid,
        at: &chrono::DateTime<chrono::FixedOffset>,
    ) -> Result<(), AppError> {
        Ok(self.user_dao.set_last_sign_in(user_id, at).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    use super::UserService;
    use crate::db::{dao::DaoBase, entities::user};

    #[tokio::test]
    async fn missing_user_is_none_not_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let found = UserService::new(DaoBase::new(&db))
            .find_by_id(&Uuid::new_v4())
            .await
            .expect("lookup should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn storage_failure_is_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = UserService::new(DaoBase::new(&db))
            .find_by_id(&Uuid::new_v4())
            .await
            .expect_err("lookup should fail");
        assert!(err.is_internal());
    }
}

use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: Uuid },
}

impl DaoLayerError {
    /// True when the database rejected a write on a unique index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Db(err) => matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))),
            Self::NotFound { .. } => false,
        }
    }
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

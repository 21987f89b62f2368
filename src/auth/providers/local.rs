use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    auth::{
        SessionToken,
        jwt::{JwtKeys, decode_token, encode_token, make_session_claims},
        password::{hash_password, verify_password},
    },
    context::Identity,
    db::{
        dao::{AccountDao, SessionDao},
        entities::user,
    },
    error::AppError,
    services::{
        auth_service::DELETE_FAILED,
        user_service::{EMAIL_TAKEN, UserService},
    },
};

use super::{AuthProvider, AuthProviderId};

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required.";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Clone)]
pub struct LocalAuthProvider {
    user_service: UserService,
    session_dao: SessionDao,
    account_dao: AccountDao,
    jwt: JwtKeys,
    session_ttl_secs: u64,
}

impl LocalAuthProvider {
    pub fn new(
        user_service: UserService,
        session_dao: SessionDao,
        account_dao: AccountDao,
        jwt: JwtKeys,
        session_ttl_secs: u64,
    ) -> Self {
        Self {
            user_service,
            session_dao,
            account_dao,
            jwt,
            session_ttl_secs,
        }
    }

    async fn open_session(&self, user: &user::Model) -> Result<SessionToken, AppError> {
        let session = self
            .session_dao
            .open(&user.id, self.session_ttl_secs)
            .await?;
        let claims = make_session_claims(&user.id, &session.id, self.session_ttl_secs);
        let token = encode_token(&self.jwt, &claims)?;

        Ok(SessionToken {
            token,
            expires_in: self.session_ttl_secs,
            identity: Identity {
                user_id: user.id,
                session_id: session.id,
                email: user.email.clone(),
            },
        })
    }

    fn parse_claims(&self, token: &str) -> Option<(Uuid, Uuid)> {
        let claims = decode_token(&self.jwt, token).ok()?;
        let user_id = Uuid::parse_str(&claims.sub).ok()?;
        let session_id = Uuid::parse_str(&claims.sid).ok()?;
        Some((user_id, session_id))
    }
}

fn normalized_credentials(email: &str, password: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request(CREDENTIALS_REQUIRED));
    }
    Ok(email)
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    fn id(&self) -> AuthProviderId {
        AuthProviderId::Local
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionToken, AppError> {
        let email = normalized_credentials(email, password)?;
        let password_hash = hash_password(password)?;

        // the unique index on email still catches a concurrent sign-up
        if self.user_service.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let user = self.user_service.create_user(&email, &password_hash).await?;
        tracing::info!(user_id = %user.id, "account created");
        self.open_session(&user).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionToken, AppError> {
        let email = normalized_credentials(email, password)?;
        let user = self
            .user_service
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let now = chrono::Utc::now().fixed_offset();
        self.user_service.set_last_sign_in(&user.id, &now).await?;
        tracing::info!(user_id = %user.id, "signed in");
        self.open_session(&user).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        if let Some((user_id, session_id)) = self.parse_claims(token) {
            self.session_dao.revoke(&session_id).await?;
            tracing::info!(user_id = %user_id, "signed out");
        }
        Ok(())
    }

    async fn current_identity(&self, token: &str) -> Result<Option<Identity>, AppError> {
        let Some((user_id, session_id)) = self.parse_claims(token) else {
            return Ok(None);
        };

        if self
            .session_dao
            .find_active(&session_id, &user_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        Ok(self
            .user_service
            .find_by_id(&user_id)
            .await?
            .map(|user| Identity {
                user_id: user.id,
                session_id,
                email: user.email,
            }))
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError> {
        let report = self
            .account_dao
            .purge(user_id)
            .await
            .map_err(|err| AppError::internal_with_source(DELETE_FAILED, err))?;
        tracing::info!(user_id = %user_id, ?report, "account deleted");
        Ok(())
    }
}

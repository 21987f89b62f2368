use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::SessionToken, context::Identity, error::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderId {
    Local,
}

impl AuthProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProviderId::Local => "local",
        }
    }
}

impl std::str::FromStr for AuthProviderId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthProviderId::Local),
            other => Err(format!("unsupported auth provider: {other}")),
        }
    }
}

/// The identity backend: credential checks plus the session lifecycle.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn id(&self) -> AuthProviderId;

    async fn sign_up(&self, email: &str, password: &str) -> Result<SessionToken, AppError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionToken, AppError>;
    async fn sign_out(&self, token: &str) -> Result<(), AppError>;

    /// `Ok(None)` for any token that does not map to a live session.
    async fn current_identity(&self, token: &str) -> Result<Option<Identity>, AppError>;

    /// Removes the user and everything they own.
    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct AuthProviders {
    active_id: AuthProviderId,
    providers: HashMap<AuthProviderId, Arc<dyn AuthProvider>>,
}

impl AuthProviders {
    pub fn new(active_id: AuthProviderId) -> Self {
        Self {
            active_id,
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn AuthProvider>) -> Result<Self, AppError> {
        self.add(provider)?;
        Ok(self)
    }

    pub fn add(&mut self, provider: Arc<dyn AuthProvider>) -> Result<(), AppError> {
        let id = provider.id();
        if self.providers.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Auth provider already registered: {}",
                id.as_str()
            )));
        }
        self.providers.insert(id, provider);
        Ok(())
    }

    pub fn set_active(&mut self, id: AuthProviderId) -> Result<(), AppError> {
        if !self.providers.contains_key(&id) {
            return Err(not_configured(id));
        }
        self.active_id = id;
        Ok(())
    }

    pub fn active_id(&self) -> AuthProviderId {
        self.active_id
    }

    pub fn active(&self) -> Result<&dyn AuthProvider, AppError> {
        self.providers
            .get(&self.active_id)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| not_configured(self.active_id))
    }
}

fn not_configured(id: AuthProviderId) -> AppError {
    AppError::internal(format!("Auth provider not configured: {}", id.as_str()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::{AuthProvider, AuthProviderId, AuthProviders};
    use crate::{auth::SessionToken, context::Identity, error::AppError};

    struct NullProvider;

    #[async_trait]
    impl AuthProvider for NullProvider {
        fn id(&self) -> AuthProviderId {
            AuthProviderId::Local
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<SessionToken, AppError> {
            Err(AppError::unauthorized("not used"))
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<SessionToken, AppError> {
            Err(AppError::unauthorized("not used"))
        }

        async fn sign_out(&self, _token: &str) -> Result<(), AppError> {
            Ok(())
        }

        async fn current_identity(&self, _token: &str) -> Result<Option<Identity>, AppError> {
            Ok(None)
        }

        async fn delete_identity(&self, _user_id: Uuid) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[test]
    fn provider_id_parses_case_insensitively() {
        assert_eq!("local".parse::<AuthProviderId>(), Ok(AuthProviderId::Local));
        assert_eq!(" LOCAL ".parse::<AuthProviderId>(), Ok(AuthProviderId::Local));
        assert_eq!(
            "supabase".parse::<AuthProviderId>(),
            Err("unsupported auth provider: supabase".to_string())
        );
    }

    #[test]
    fn duplicate_registration_is_a_conflict() {
        let mut providers = AuthProviders::new(AuthProviderId::Local);
        providers
            .add(Arc::new(NullProvider))
            .expect("first registration should succeed");

        let err = providers
            .add(Arc::new(NullProvider))
            .expect_err("duplicate registration should fail");
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.message(), "Auth provider already registered: local");
    }

    #[test]
    fn active_requires_a_registered_provider() {
        let empty = AuthProviders::new(AuthProviderId::Local);
        let err = match empty.active() {
            Ok(_) => panic!("empty registry has no active provider"),
            Err(err) => err,
        };
        assert_eq!(err.message(), "Auth provider not configured: local");

        let mut providers = AuthProviders::new(AuthProviderId::Local)
            .with_provider(Arc::new(NullProvider))
            .expect("registration should succeed");
        providers
            .set_active(AuthProviderId::Local)
            .expect("registered provider can be activated");
        assert_eq!(providers.active_id(), AuthProviderId::Local);
        assert!(providers.active().is_ok());
    }
}

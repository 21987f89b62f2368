use crate::{
    auth::{SessionToken, providers::AuthProviders},
    context::{Identity, RequestContext},
    error::AppError,
    page_cache::PageCache,
    services::resource_service::ActionOutcome,
};

pub const CONFIRM_DELETE: &str = "Confirm the checkbox to delete your account.";
pub const SIGN_IN_TO_DELETE: &str = "You must be signed in to delete your account.";
pub const DELETE_FAILED: &str = "Unable to delete account. Please try again.";
pub const ACCOUNT_DELETED: &str = "Account deleted. Goodbye!";
pub const SIGNED_IN: &str = "Signed in.";

/// Account actions routed through whichever provider is active.
#[derive(Clone, Copy)]
pub struct AuthService<'a> {
    providers: &'a AuthProviders,
    pages: &'a PageCache,
}

impl<'a> AuthService<'a> {
    pub fn new(providers: &'a AuthProviders, pages: &'a PageCache) -> Self {
        Self { providers, pages }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SessionToken, AppError> {
        self.providers.active()?.sign_up(email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionToken, AppError> {
        self.providers.active()?.sign_in(email, password).await
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        self.providers.active()?.sign_out(token).await
    }

    pub async fn current_identity(&self, token: &str) -> Result<Option<Identity>, AppError> {
        self.providers.active()?.current_identity(token).await
    }

    /// Deletes the signed-in account and everything it owns.
    pub async fn delete_account(
        &self,
        ctx: &RequestContext,
        confirmed: bool,
    ) -> Result<ActionOutcome, AppError> {
        if !confirmed {
            return Ok(ActionOutcome::rejected(CONFIRM_DELETE));
        }
        let Some(identity) = ctx.identity() else {
            return Ok(ActionOutcome::rejected(SIGN_IN_TO_DELETE));
        };

        let provider = self.providers.active()?;
        if let Err(err) = provider.delete_identity(identity.user_id).await {
            tracing::error!(user_id = %identity.user_id, error = ?err, "account deletion failed");
            return Ok(ActionOutcome::rejected(DELETE_FAILED));
        }

        self.pages.invalidate_all().await;
        Ok(ActionOutcome::done(1).with_message(ACCOUNT_DELETED))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::auth::providers::{AuthProvider, AuthProviderId};
    use crate::page_cache::PageKey;

    #[derive(Default)]
    struct RecordingProvider {
        deletions: AtomicUsize,
        fail_delete: bool,
    }

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            email: "delegate@example.com".to_string(),
        }
    }

    #[async_trait]
    impl AuthProvider for RecordingProvider {
        fn id(&self) -> AuthProviderId {
            AuthProviderId::Local
        }

        async fn sign_up(&self, email: &str, _password: &str) -> Result<SessionToken, AppError> {
            Ok(SessionToken {
                token: format!("sign-up:{email}"),
                expires_in: 60,
                identity: identity(),
            })
        }

        async fn sign_in(&self, email: &str, _password: &str) -> Result<SessionToken, AppError> {
            Ok(SessionToken {
                token: format!("sign-in:{email}"),
                expires_in: 60,
                identity: identity(),
            })
        }

        async fn sign_out(&self, _token: &str) -> Result<(), AppError> {
            Ok(())
        }

        async fn current_identity(&self, token: &str) -> Result<Option<Identity>, AppError> {
            Ok((token == "live").then(identity))
        }

        async fn delete_identity(&self, _user_id: Uuid) -> Result<(), AppError> {
            self.deletions.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(AppError::internal("purge failed"));
            }
            Ok(())
        }
    }

    fn providers(provider: Arc<RecordingProvider>) -> AuthProviders {
        AuthProviders::new(AuthProviderId::Local)
            .with_provider(provider)
            .expect("provider registration should succeed")
    }

    #[tokio::test]
    async fn delegates_session_calls_to_active_provider() {
        let providers = providers(Arc::new(RecordingProvider::default()));
        let pages = PageCache::new();
        let service = AuthService::new(&providers, &pages);

        let session = service
            .sign_in("ash@example.com", "pikachu")
            .await
            .expect("sign in should succeed");
        assert_eq!(session.token, "sign-in:ash@example.com");

        assert!(service.current_identity("live").await.expect("lookup").is_some());
        assert!(service.current_identity("dead").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn delete_requires_confirmation_then_identity() {
        let provider = Arc::new(RecordingProvider::default());
        let providers = providers(Arc::clone(&provider));
        let pages = PageCache::new();
        let service = AuthService::new(&providers, &pages);
        let ctx = RequestContext::authenticated(identity());

        let outcome = service.delete_account(&ctx, false).await.expect("outcome");
        assert_eq!(outcome, ActionOutcome::rejected(CONFIRM_DELETE));

        let outcome = service
            .delete_account(&RequestContext::anonymous(), true)
            .await
            .expect("outcome");
        assert_eq!(outcome, ActionOutcome::rejected(SIGN_IN_TO_DELETE));
        assert_eq!(provider.deletions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_delete_clears_every_cached_page() {
        let provider = Arc::new(RecordingProvider::default());
        let providers = providers(Arc::clone(&provider));
        let pages = PageCache::new();
        let seen = pages.generation("/todos").await;
        pages
            .put(PageKey::new("/todos", Uuid::new_v4(), None), "html".into(), seen)
            .await;
        let service = AuthService::new(&providers, &pages);

        let outcome = service
            .delete_account(&RequestContext::authenticated(identity()), true)
            .await
            .expect("outcome");
        assert!(outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(ACCOUNT_DELETED));
        assert!(pages.is_empty().await);
        assert_eq!(provider.deletions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_delete_reports_generic_message() {
        let providers = providers(Arc::new(RecordingProvider {
            fail_delete: true,
            ..Default::default()
        }));
        let pages = PageCache::new();
        let service = AuthService::new(&providers, &pages);

        let outcome = service
            .delete_account(&RequestContext::authenticated(identity()), true)
            .await
            .expect("outcome");
        assert_eq!(outcome, ActionOutcome::rejected(DELETE_FAILED));
    }
}

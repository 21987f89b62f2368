use uuid::Uuid;

use crate::error::AppError;

/// The signed-in user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub email: String,
}

/// Per-request state handed to every action. Resolved once from the session
/// cookie and cached in the request extensions.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn require_identity(&self) -> Result<&Identity, AppError> {
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{Identity, RequestContext};
    use crate::error::AppError;

    #[test]
    fn anonymous_context_refuses_actions() {
        let err = RequestContext::anonymous()
            .require_identity()
            .expect_err("anonymous context has no identity");
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn authenticated_context_exposes_identity() {
        let identity = Identity {
            user_id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            email: "brock@example.com".to_string(),
        };
        let ctx = RequestContext::authenticated(identity.clone());
        assert_eq!(ctx.require_identity().ok(), Some(&identity));
    }
}

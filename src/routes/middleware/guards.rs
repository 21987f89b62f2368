use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    auth::cookie::session_token,
    context::{Identity, RequestContext},
    error::AppError,
    state::AppState,
};

// Resolves the session cookie once per request and caches the result.
impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>().cloned() {
            return Ok(ctx);
        }

        let ctx = match session_token(&parts.headers) {
            Some(token) => state
                .auth_providers
                .active()?
                .current_identity(&token)
                .await?
                .map(RequestContext::authenticated)
                .unwrap_or_default(),
            None => RequestContext::anonymous(),
        };

        parts.extensions.insert(ctx.clone());
        Ok(ctx)
    }
}

/// Protected-page extractor: anonymous visitors are sent back to `/`.
pub struct SessionGuard {
    pub ctx: RequestContext,
    pub identity: Identity,
}

impl FromRequestParts<Arc<AppState>> for SessionGuard {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match ctx.identity().cloned() {
            Some(identity) => Ok(Self { ctx, identity }),
            None => Err(Redirect::to("/").into_response()),
        }
    }
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Router,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
    routing::post,
};

use crate::{
    auth::cookie::{clear_session_cookie, session_cookie, session_token},
    context::RequestContext,
    error::AppError,
    forms::FormFields,
    routes::{response::SOMETHING_WENT_WRONG, views::page::flash_location},
    services::{ServiceContext, auth_service::SIGNED_IN},
    state::AppState,
};

const HOME: &str = "/";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/delete-account", post(delete_account))
}

fn credentials(fields: &FormFields) -> (String, String) {
    (
        fields.raw("email").unwrap_or_default().to_string(),
        fields.raw("password").unwrap_or_default().to_string(),
    )
}

fn secure_cookies(state: &AppState) -> bool {
    state
        .config
        .auth
        .as_ref()
        .is_some_and(|auth| auth.secure_cookies)
}

/// Client-facing errors become a flash on the landing page.
fn home_with_error(err: AppError) -> Response {
    let message = if err.is_internal() {
        tracing::error!(error = %err, "account action failed");
        SOMETHING_WENT_WRONG
    } else {
        err.message()
    };
    Redirect::to(&flash_location(HOME, "", Some(("error", message)))).into_response()
}

fn signed_in_redirect(
    state: &AppState,
    location: &str,
    token: &str,
    expires_in: u64,
) -> Result<Response, AppError> {
    let cookie = session_cookie(token, expires_in, secure_cookies(state))?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(location)).into_response())
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let (email, password) = credentials(&FormFields::from(fields));
    let services = ServiceContext::from_state(&state);

    let result = match services.auth(&state.auth_providers).sign_up(&email, &password).await {
        Ok(session) => signed_in_redirect(&state, HOME, &session.token, session.expires_in),
        Err(err) => Err(err),
    };
    result.unwrap_or_else(home_with_error)
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let (email, password) = credentials(&FormFields::from(fields));
    let services = ServiceContext::from_state(&state);

    let result = match services.auth(&state.auth_providers).sign_in(&email, &password).await {
        Ok(session) => {
            let location = flash_location(HOME, "", Some(("notice", SIGNED_IN)));
            signed_in_redirect(&state, &location, &session.token, session.expires_in)
        }
        Err(err) => Err(err),
    };
    result.unwrap_or_else(home_with_error)
}

async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        let services = ServiceContext::from_state(&state);
        if let Err(err) = services.auth(&state.auth_providers).sign_out(&token).await {
            tracing::warn!(error = %err, "session revoke failed during sign out");
        }
    }

    (
        [(header::SET_COOKIE, clear_session_cookie(secure_cookies(&state)))],
        Redirect::to(HOME),
    )
        .into_response()
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let confirmed = FormFields::from(fields).raw("confirmed") == Some("true");
    let services = ServiceContext::from_state(&state);

    let outcome = match services
        .auth(&state.auth_providers)
        .delete_account(&ctx, confirmed)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return home_with_error(err),
    };

    let message = outcome.message.as_deref().unwrap_or_default();
    if !outcome.success {
        return Redirect::to(&flash_location(HOME, "", Some(("error", message)))).into_response();
    }

    (
        [(header::SET_COOKIE, clear_session_cookie(secure_cookies(&state)))],
        Redirect::to(&flash_location(HOME, "", Some(("notice", message)))),
    )
        .into_response()
}

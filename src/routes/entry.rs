use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware};
use tower_http::services::ServeDir;

use crate::state::AppState;

use super::{
    auth,
    middleware::{catch_panic_layer, html_error_middleware},
    views,
};

pub fn router(state: Arc<AppState>) -> Router {
    let public_dir = resolve_public_dir(&state);
    Router::new()
        .merge(views::router())
        .merge(auth::router())
        .nest_service("/static", ServeDir::new(public_dir))
        .with_state(state)
}

/// The router with the HTML error and panic layers applied.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(html_error_middleware))
        .layer(catch_panic_layer())
}

fn resolve_public_dir(state: &AppState) -> PathBuf {
    if let Some(path) = &state.config.general.public_dir {
        return path.clone();
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let candidate = exe_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}

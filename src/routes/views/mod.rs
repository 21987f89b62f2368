use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

mod drive;
mod food;
mod home;
mod notes;
pub mod page;
mod pokemon;
mod todos;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(home::router())
        .merge(todos::router())
        .merge(drive::router())
        .merge(food::router())
        .merge(pokemon::router())
        .merge(notes::router())
}

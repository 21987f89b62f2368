mod auth;
mod entry;
pub mod middleware;
pub mod response;
pub mod views;

pub use entry::{app, router};
pub use middleware::{SessionGuard, catch_panic_layer, html_error_middleware};

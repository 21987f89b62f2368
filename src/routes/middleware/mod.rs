mod guards;
mod html_error;
mod panic;

pub use guards::SessionGuard;
pub use html_error::html_error_middleware;
pub use panic::catch_panic_layer;

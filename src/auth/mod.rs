pub mod bootstrap;
pub mod cookie;
pub mod jwt;
pub mod password;
pub mod providers;
mod types;

pub use types::{Claims, SessionToken};

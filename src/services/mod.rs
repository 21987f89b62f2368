pub mod auth_service;
pub mod context;
pub mod listing;
pub mod pokedex_service;
pub mod resource_service;
pub mod resources;
pub mod user_service;

pub use context::ServiceContext;
pub use resource_service::{ActionOutcome, Resource, ResourceService};

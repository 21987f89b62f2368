pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod forms;
pub mod logging;
pub mod page_cache;
pub mod routes;
pub mod services;
pub mod state;

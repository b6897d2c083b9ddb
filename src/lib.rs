pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod schema;
pub mod state;

pub use app::router;
pub use state::AppState;

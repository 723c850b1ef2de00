// HTTP adapter over the controllers

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;

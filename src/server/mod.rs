pub mod app;
pub mod extract;
pub mod routes;

pub use app::{build_app, AppState};

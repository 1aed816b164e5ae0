//! API layer - HTTP handlers, extractors and route definitions.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod requests;
pub mod response;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;

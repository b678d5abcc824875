//! HTTP surface of the weather proxy.
//!
//! Exposes `GET /weather?city=` which merges the provider's current-conditions
//! and forecast documents into a single JSON body.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

//! Stockholm Direkt HTTP presentation layer
//!
//! JSON API over the stop search, trip lookup and contact relay services.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use extract::{ApiJson, ApiQuery};
pub use routes::create_router;
pub use state::{AppState, StateError};

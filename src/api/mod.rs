//! HTTP API module.
//!
//! REST endpoints backing the settings and dependencies widgets.

mod error;
mod handlers;
mod routes;
mod state;

// Re-export error types for external use
#[allow(unused_imports)]
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;

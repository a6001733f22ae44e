//! Web layer for the bus fare service.
//!
//! Provides HTTP endpoints for location lookup and fare calculation.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, cors_layer, create_router};
pub use state::AppState;

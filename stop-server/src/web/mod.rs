//! Web layer for the stop directory.
//!
//! Serves the map page and the JSON API its script drives. The layer owns
//! the page session and turns control events into selection transitions.

mod dto;
mod refresh;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use refresh::{refresh_details, spawn_details_refresh};
pub use routes::{AppError, create_router};
pub use state::{AppState, Session};
pub use templates::*;

//! The static stop collection.
//!
//! Loaded once at startup from a JSON file and read-only afterwards.

mod catalog;
mod error;

pub use catalog::StopCatalog;
pub use error::CatalogError;

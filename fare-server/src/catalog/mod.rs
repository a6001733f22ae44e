//! In-memory location catalog.
//!
//! The catalog is read once from a static bilingual dataset and shared,
//! read-only, for the lifetime of the process.

mod error;
mod source;
mod store;

pub use error::CatalogError;
pub use source::{CatalogSource, DEFAULT_DATA_PATH};
pub use store::{Catalog, CatalogSnapshot};

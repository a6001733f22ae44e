//! Catalog error types.

use std::path::PathBuf;

/// Failures while loading the location dataset.
///
/// Any of these at startup means the service cannot run.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset file could not be read
    #[error("failed to read location data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not a JSON array of locations
    #[error("malformed location data in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

//! Where the catalog reads its records from.

use std::path::PathBuf;

use crate::domain::LocationRecord;

use super::error::CatalogError;

/// Default location of the bundled dataset.
pub const DEFAULT_DATA_PATH: &str = "data/dhaka_areas.json";

/// A static source of location records.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A JSON file on disk holding an array of records.
    File(PathBuf),
    /// A JSON document held in memory.
    Json(String),
    /// Records supplied directly.
    Records(Vec<LocationRecord>),
}

impl CatalogSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        CatalogSource::File(path.into())
    }

    /// Read and parse every record from the source.
    pub fn read(&self) -> Result<Vec<LocationRecord>, CatalogError> {
        match self {
            CatalogSource::File(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
                    path: path.clone(),
                    source: e,
                })?;
                parse(&contents, &path.display().to_string())
            }
            CatalogSource::Json(json) => parse(json, "inline JSON"),
            CatalogSource::Records(records) => Ok(records.clone()),
        }
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::file(DEFAULT_DATA_PATH)
    }
}

fn parse(json: &str, origin: &str) -> Result<Vec<LocationRecord>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::Malformed {
        origin: origin.to_string(),
        source: e,
    })
}

//! The load-once catalog store.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::domain::LocationRecord;

use super::error::CatalogError;
use super::source::CatalogSource;

/// An immutable view of the loaded catalog.
///
/// Names are case-folded once at load so searches never re-fold them.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    records: Vec<LocationRecord>,
    folded: Vec<FoldedNames>,
}

/// Lowercased copies of a record's two names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FoldedNames {
    pub en: String,
    pub bn: String,
}

impl CatalogSnapshot {
    fn new(records: Vec<LocationRecord>) -> Self {
        let folded = records
            .iter()
            .map(|r| FoldedNames {
                en: r.name_en.to_lowercase(),
                bn: r.name_bn.to_lowercase(),
            })
            .collect();
        Self { records, folded }
    }

    /// All records, in dataset order.
    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at position `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }

    /// Records paired with their folded names.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&LocationRecord, &FoldedNames)> {
        self.records.iter().zip(self.folded.iter())
    }
}

/// Thread-safe location catalog.
///
/// Created empty and populated from its source exactly once, either at
/// startup through [`Catalog::load`] or lazily on first read. Once loaded
/// the records never change, so readers share one snapshot.
#[derive(Debug)]
pub struct Catalog {
    source: CatalogSource,
    loaded: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl Catalog {
    /// Create an unloaded catalog backed by `source`.
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            loaded: RwLock::new(None),
        }
    }

    /// Create an already-loaded catalog from records.
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        let snapshot = Arc::new(CatalogSnapshot::new(records.clone()));
        Self {
            source: CatalogSource::Records(records),
            loaded: RwLock::new(Some(snapshot)),
        }
    }

    /// Load the catalog from its source, returning the record count.
    ///
    /// Only the first successful call reads the source; later calls are
    /// no-ops.
    pub fn load(&self) -> Result<usize, CatalogError> {
        self.snapshot().map(|s| s.len())
    }

    /// Whether the records have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The loaded snapshot, loading it first if necessary.
    pub fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        {
            let guard = self.loaded.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = guard.as_ref() {
                return Ok(Arc::clone(snapshot));
            }
        }

        let mut guard = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have loaded while we waited for the write lock
        if let Some(snapshot) = guard.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let records = self.source.read()?;
        let snapshot = Arc::new(CatalogSnapshot::new(records));
        info!(count = snapshot.len(), "Loaded locations into memory");
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// All records in dataset order, with their count.
    pub fn all(&self) -> Result<(Vec<LocationRecord>, usize), CatalogError> {
        let snapshot = self.snapshot()?;
        Ok((snapshot.records().to_vec(), snapshot.len()))
    }

    /// Number of loaded records.
    pub fn count(&self) -> Result<usize, CatalogError> {
        self.snapshot().map(|s| s.len())
    }

    /// The record at position `index`, or `None` when out of range.
    ///
    /// Positions are only meaningful for the current dataset.
    pub fn by_index(&self, index: usize) -> Result<Option<LocationRecord>, CatalogError> {
        Ok(self.snapshot()?.get(index).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::tempdir;

    fn sample_json() -> String {
        r#"[
            {"nameEn":"Mirpur 10","nameBn":"মিরপুর ১০","lat":23.8069,"lon":90.3687},
            {"nameEn":"Farmgate","nameBn":"ফার্মগেট","lat":23.7561,"lon":90.3872},
            {"nameEn":"Motijheel","nameBn":"মতিঝিল","lat":23.7330,"lon":90.4172}
        ]"#
        .to_string()
    }

    #[test]
    fn lazy_load_on_first_read() {
        let catalog = Catalog::new(CatalogSource::Json(sample_json()));
        assert!(!catalog.is_loaded());

        assert_eq!(catalog.count().unwrap(), 3);
        assert!(catalog.is_loaded());
    }

    #[test]
    fn all_preserves_order() {
        let catalog = Catalog::new(CatalogSource::Json(sample_json()));
        let (records, total) = catalog.all().unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = records.iter().map(|r| r.name_en.as_str()).collect();
        assert_eq!(names, vec!["Mirpur 10", "Farmgate", "Motijheel"]);
    }

    #[test]
    fn second_load_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("areas.json");
        std::fs::write(&path, sample_json()).unwrap();

        let catalog = Catalog::new(CatalogSource::file(&path));
        assert_eq!(catalog.load().unwrap(), 3);

        // The source is never read again once loaded
        std::fs::remove_file(&path).unwrap();
        assert_eq!(catalog.load().unwrap(), 3);
        assert_eq!(catalog.count().unwrap(), 3);
    }

    #[test]
    fn load_failure_leaves_catalog_unloaded() {
        let catalog = Catalog::new(CatalogSource::file("/nonexistent/areas.json"));
        assert!(catalog.load().is_err());
        assert!(!catalog.is_loaded());
    }

    #[test]
    fn by_index_bounds() {
        let catalog = Catalog::new(CatalogSource::Json(sample_json()));
        assert_eq!(
            catalog.by_index(1).unwrap().map(|r| r.name_en),
            Some("Farmgate".to_string())
        );
        assert_eq!(catalog.by_index(3).unwrap(), None);
        assert_eq!(catalog.by_index(usize::MAX).unwrap(), None);
    }

    #[test]
    fn duplicates_kept_at_load() {
        let record = LocationRecord::new("Shahbag", "শাহবাগ", 23.7383, 90.3957);
        let catalog = Catalog::from_records(vec![record.clone(), record]);
        assert_eq!(catalog.count().unwrap(), 2);
    }

    #[test]
    fn snapshot_folds_names() {
        let catalog = Catalog::from_records(vec![LocationRecord::new(
            "New Market",
            "নিউ মার্কেট",
            23.7330,
            90.3840,
        )]);
        let snapshot = catalog.snapshot().unwrap();
        let (_, folded) = snapshot.entries().next().unwrap();
        assert_eq!(folded.en, "new market");
        assert_eq!(folded.bn, "নিউ মার্কেট");
    }

    #[test]
    fn bundled_dataset_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/dhaka_areas.json");
        let catalog = Catalog::new(CatalogSource::file(path));
        let count = catalog.load().unwrap();
        assert!(count > 0);
        let snapshot = catalog.snapshot().unwrap();
        assert!(snapshot.records().iter().all(|r| r.is_named() && !r.name_bn.is_empty()));
    }

    #[test]
    fn concurrent_first_access_loads_once() {
        let catalog = Arc::new(Catalog::new(CatalogSource::Json(sample_json())));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || catalog.snapshot().unwrap())
            })
            .collect();

        let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for snapshot in &snapshots[1..] {
            assert!(Arc::ptr_eq(&snapshots[0], snapshot));
        }
    }
}

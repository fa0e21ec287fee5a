//! In-Memory Supplier Catalog
//!
//! DashMap-backed supplier registry with JSON seed-file loading and a
//! periodic reload loop.

use crate::domain::entities::Supplier;
use crate::domain::ports::SupplierCatalog;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// In-memory supplier catalog.
///
/// Serves both as the registry behind the discovery API (register and
/// deregister) and as the snapshot target of the seed-file sync loop.
/// Listing order is by supplier id so results are deterministic.
pub struct MemorySupplierCatalog {
    suppliers: Arc<DashMap<String, Supplier>>,
    version: Arc<AtomicU64>,
}

impl MemorySupplierCatalog {
    pub fn new() -> Self {
        Self {
            suppliers: Arc::new(DashMap::new()),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register or update a supplier. An empty id gets a generated UUID.
    pub fn register(&self, mut supplier: Supplier) -> Supplier {
        if supplier.id.is_empty() {
            supplier.id = uuid::Uuid::new_v4().to_string();
        }
        self.suppliers
            .insert(supplier.id.clone(), supplier.clone());
        self.version.fetch_add(1, Ordering::SeqCst);
        supplier
    }

    /// Remove a supplier by id. Returns whether it existed.
    pub fn deregister(&self, id: &str) -> bool {
        let removed = self.suppliers.remove(id).is_some();
        if removed {
            self.version.fetch_add(1, Ordering::SeqCst);
        }
        removed
    }

    /// Replace the whole catalog with a new snapshot.
    pub fn replace_all(&self, suppliers: Vec<Supplier>) {
        self.suppliers.clear();
        for s in suppliers {
            self.suppliers.insert(s.id.clone(), s);
        }
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Monotonic revision counter, bumped on every mutation.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Load suppliers from a JSON seed file, replacing the current snapshot.
    pub async fn load_from_file(&self, path: &str) -> anyhow::Result<usize> {
        let suppliers = Self::read_seed_file(path).await?;
        let count = suppliers.len();
        self.replace_all(suppliers);
        Ok(count)
    }

    async fn read_seed_file(path: &str) -> anyhow::Result<Vec<Supplier>> {
        let bytes = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Start the periodic seed-file reload loop.
    pub fn start_file_sync(&self, path: String, interval_secs: u64) {
        let suppliers = self.suppliers.clone();
        let version = self.version.clone();

        tokio::spawn(async move {
            loop {
                match Self::read_seed_file(&path).await {
                    Ok(new_suppliers) => {
                        let count = new_suppliers.len();
                        suppliers.clear();
                        for s in new_suppliers {
                            suppliers.insert(s.id.clone(), s);
                        }
                        let new_version = version.fetch_add(1, Ordering::SeqCst) + 1;
                        tracing::info!(
                            version = new_version,
                            suppliers = count,
                            "catalog reload ok"
                        );
                    }
                    Err(e) => tracing::error!(path = %path, "error reading catalog: {:?}", e),
                }

                sleep(Duration::from_secs(interval_secs)).await;
            }
        });
    }
}

impl Default for MemorySupplierCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SupplierCatalog for MemorySupplierCatalog {
    async fn get_all(&self) -> Vec<Supplier> {
        let mut all: Vec<Supplier> = self
            .suppliers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_supplier(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {}", id),
            category: "vegetables".to_string(),
            lat: Some(28.7),
            lon: Some(77.1),
            rating: None,
            specialties: Vec::new(),
            products: Vec::new(),
            contact: None,
        }
    }

    // ===== Registration Tests =====

    #[tokio::test]
    async fn test_register_and_get_all() {
        let catalog = MemorySupplierCatalog::new();
        catalog.register(create_supplier("b"));
        catalog.register(create_supplier("a"));

        let all = catalog.get_all().await;
        assert_eq!(all.len(), 2);
        // Deterministic listing order by id
        assert_eq!(all[0].id, "a");
        assert_eq!(all[1].id, "b");
    }

    #[test]
    fn test_register_generates_uuid_for_empty_id() {
        let catalog = MemorySupplierCatalog::new();
        let registered = catalog.register(create_supplier(""));

        assert!(!registered.id.is_empty());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_register_updates_existing() {
        let catalog = MemorySupplierCatalog::new();
        catalog.register(create_supplier("s1"));

        let mut updated = create_supplier("s1");
        updated.name = "Renamed".to_string();
        catalog.register(updated);

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_deregister() {
        let catalog = MemorySupplierCatalog::new();
        catalog.register(create_supplier("s1"));

        assert!(catalog.deregister("s1"));
        assert!(!catalog.deregister("s1"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let catalog = MemorySupplierCatalog::new();
        assert_eq!(catalog.version(), 0);

        catalog.register(create_supplier("s1"));
        assert_eq!(catalog.version(), 1);

        catalog.deregister("s1");
        assert_eq!(catalog.version(), 2);
    }

    // ===== Snapshot Tests =====

    #[tokio::test]
    async fn test_replace_all_swaps_snapshot() {
        let catalog = MemorySupplierCatalog::new();
        catalog.register(create_supplier("old"));

        catalog.replace_all(vec![create_supplier("new1"), create_supplier("new2")]);

        let all = catalog.get_all().await;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|s| s.id != "old"));
    }

    // ===== Seed File Tests =====

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"s1","name":"Sharma","category":"vegetables","lat":28.7,"lon":77.1}}]"#
        )
        .unwrap();

        let catalog = MemorySupplierCatalog::new();
        let count = catalog
            .load_from_file(file.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_missing_file_errors() {
        let catalog = MemorySupplierCatalog::new();
        assert!(catalog.load_from_file("/nonexistent/suppliers.json").await.is_err());
    }

    #[tokio::test]
    async fn test_load_from_malformed_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let catalog = MemorySupplierCatalog::new();
        catalog.register(create_supplier("keep"));

        assert!(catalog
            .load_from_file(file.path().to_str().unwrap())
            .await
            .is_err());
        // Failed reload leaves the current snapshot untouched
        assert_eq!(catalog.len(), 1);
    }
}

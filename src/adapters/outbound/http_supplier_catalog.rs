//! HTTP Supplier Catalog
//!
//! Implements SupplierCatalog against a remote catalog service, keeping the
//! last good snapshot for fetch failures.

use crate::domain::entities::Supplier;
use crate::domain::ports::SupplierCatalog;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

/// Remote supplier catalog over HTTP.
///
/// Fetches `GET {base_url}/suppliers` expecting a JSON array of supplier
/// records. On any fetch or decode failure the previous snapshot is served,
/// so a flaky catalog service degrades to stale data instead of an empty
/// result.
pub struct HttpSupplierCatalog {
    client: reqwest::Client,
    base_url: String,
    last_good: RwLock<Vec<Supplier>>,
}

impl HttpSupplierCatalog {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            last_good: RwLock::new(Vec::new()),
        })
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Supplier>> {
        let url = format!("{}/suppliers", self.base_url);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            anyhow::bail!("catalog service returned {}", resp.status());
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl SupplierCatalog for HttpSupplierCatalog {
    async fn get_all(&self) -> Vec<Supplier> {
        match self.fetch().await {
            Ok(suppliers) => {
                *self.last_good.write().await = suppliers.clone();
                suppliers
            }
            Err(e) => {
                let stale = self.last_good.read().await.clone();
                tracing::warn!(
                    error = %e,
                    stale = stale.len(),
                    "catalog fetch failed, serving last good snapshot"
                );
                stale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builds_and_trims_trailing_slash() {
        let catalog = HttpSupplierCatalog::new("http://catalog.local/".to_string()).unwrap();
        assert_eq!(catalog.base_url, "http://catalog.local");
    }

    #[test]
    fn test_catalog_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpSupplierCatalog>();
    }

    #[tokio::test]
    async fn test_unreachable_service_serves_empty_snapshot() {
        // No server on this port; the initial last-good snapshot is empty
        let catalog = HttpSupplierCatalog::new("http://127.0.0.1:59999".to_string()).unwrap();
        assert!(catalog.get_all().await.is_empty());
    }
}

//! Supplier Catalog Port
//!
//! Defines the interface for the external supplier directory.

use crate::domain::entities::Supplier;
use async_trait::async_trait;

/// Read access to the supplier directory.
///
/// This is an outbound port: the core has no knowledge of where supplier
/// records come from (a seed file, a registration API, a remote catalog
/// service). Implementations return their current snapshot; fetch failures
/// are handled inside the adapter, not surfaced here.
#[async_trait]
pub trait SupplierCatalog: Send + Sync {
    /// Current supplier records, in a deterministic order.
    async fn get_all(&self) -> Vec<Supplier>;
}

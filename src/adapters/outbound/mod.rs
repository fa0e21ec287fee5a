mod cached_location_provider;
mod fixed_location_provider;
mod http_supplier_catalog;
mod ip_api_locator;
mod maxmind_locator;
mod memory_supplier_catalog;

pub use cached_location_provider::CachedLocationProvider;
pub use fixed_location_provider::{FixedLocationProvider, UnsupportedLocationProvider};
pub use http_supplier_catalog::HttpSupplierCatalog;
pub use ip_api_locator::IpApiLocator;
pub use maxmind_locator::MaxMindLocator;
pub use memory_supplier_catalog::MemorySupplierCatalog;

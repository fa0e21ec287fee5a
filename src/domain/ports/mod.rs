mod approximate_locator;
mod location_provider;
mod supplier_catalog;

pub use approximate_locator::ApproximateLocator;
pub use location_provider::{LocationProvider, PositionRequest};
pub use supplier_catalog::SupplierCatalog;

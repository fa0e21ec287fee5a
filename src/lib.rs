//! Supply Setu nearby-supplier core
//!
//! This module exposes the nearby-supplier components for use in integration
//! tests and as a library.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{LocationService, NearbyQuery, NearbyService, OriginSource};
pub use config::load_config;
pub use domain::entities::{LocationFix, NearbySupplier, Supplier};
pub use domain::errors::LocationError;
pub use domain::ports::{ApproximateLocator, LocationProvider, PositionRequest, SupplierCatalog};
pub use domain::services::{distance_km, estimated_delivery_time, format_distance, NearbyFilter};
pub use domain::value_objects::{Accuracy, Coordinate, PermissionState};

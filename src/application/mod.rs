mod location_service;
mod nearby_service;

pub use location_service::{LocationService, ResolvedLocation};
pub use nearby_service::{NearbyOutcome, NearbyQuery, NearbyService, OriginSource};

mod distance;
mod nearby;

pub use distance::{distance_km, EARTH_RADIUS_KM};
pub use nearby::{estimated_delivery_time, format_distance, NearbyFilter};

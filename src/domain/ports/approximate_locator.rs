//! Approximate Locator Port
//!
//! Defines the interface for coarse location fallback sources.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use async_trait::async_trait;

/// Coarse location source used when the precise provider fails.
///
/// This is an outbound port. Implementations may call an IP-geolocation
/// service or look the caller up in a GeoIP database; the fix they return is
/// always [`Accuracy::Approximate`](crate::domain::value_objects::Accuracy).
#[async_trait]
pub trait ApproximateLocator: Send + Sync {
    /// Produce a coarse fix for the caller.
    ///
    /// Fails with [`LocationError::ApproximationFailed`] when no coordinate
    /// can be produced at all.
    async fn approximate_position(&self) -> Result<LocationFix, LocationError>;
}

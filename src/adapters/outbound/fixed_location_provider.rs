//! Fixed and Unsupported Location Providers
//!
//! Deployment stand-ins for platforms without a real position sensor.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use crate::domain::ports::{LocationProvider, PositionRequest};
use crate::domain::value_objects::{Coordinate, PermissionState};
use async_trait::async_trait;

/// Provider pinned to one configured position.
///
/// Used for kiosk installs where the terminal's position is known and for
/// test fixtures. Always reports permission granted.
pub struct FixedLocationProvider {
    fix: LocationFix,
}

impl FixedLocationProvider {
    /// Accuracy radius reported for a configured fixed position.
    const FIXED_ACCURACY_M: f64 = 50.0;

    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            fix: LocationFix::precise(coordinate, Self::FIXED_ACCURACY_M),
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_position(&self, _req: PositionRequest) -> Result<LocationFix, LocationError> {
        Ok(self.fix)
    }

    async fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }
}

/// Provider for platforms with no location capability at all.
///
/// Every request fails with [`LocationError::Unsupported`], which sends the
/// caller straight to the approximate fallback.
pub struct UnsupportedLocationProvider;

#[async_trait]
impl LocationProvider for UnsupportedLocationProvider {
    async fn request_position(&self, _req: PositionRequest) -> Result<LocationFix, LocationError> {
        Err(LocationError::Unsupported)
    }
}

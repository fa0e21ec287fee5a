//! Location Provider Port
//!
//! Defines the interface for the platform position source.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use crate::domain::value_objects::PermissionState;
use async_trait::async_trait;
use std::time::Duration;

/// Options for a single position request.
#[derive(Debug, Clone, Copy)]
pub struct PositionRequest {
    /// Upper bound on the wait for a fix
    pub timeout: Duration,
    /// A cached fix no older than this may be reused instead of activating
    /// the sensor again
    pub max_age: Duration,
}

impl Default for PositionRequest {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

/// Source of high-accuracy position fixes.
///
/// This is an outbound port that abstracts the platform location capability
/// (a device sensor, a browser API bridge, a fixed kiosk position).
/// Implementations deliver at most one fix or one error per request and are
/// never retried automatically. Dropping the returned future cancels the
/// request; no result or error is delivered in that case.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request a single position fix.
    ///
    /// Errors use the [`LocationError`] taxonomy so callers can pick the
    /// matching fallback behavior per kind.
    async fn request_position(&self, req: PositionRequest) -> Result<LocationFix, LocationError>;

    /// Current permission state for this provider.
    ///
    /// Defaults to [`PermissionState::Prompt`] for platforms that expose no
    /// permission query capability.
    async fn permission_state(&self) -> PermissionState {
        PermissionState::Prompt
    }
}

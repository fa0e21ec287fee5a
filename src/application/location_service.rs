//! Location Service - position acquisition use case
//!
//! Orchestrates the precise provider and the approximate fallback: one
//! precise attempt, then at most one automatic fallback attempt, then give
//! up and surface the error.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use crate::domain::ports::{ApproximateLocator, LocationProvider, PositionRequest};
use crate::domain::value_objects::PermissionState;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a full resolution flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    pub fix: LocationFix,
    /// Whether the approximate fallback produced this fix
    pub fell_back: bool,
}

/// Position acquisition service.
///
/// Holds no mutable state: every call produces a fresh fix (or error), and
/// concurrent calls race independently, each with its own provider request
/// and its own timeout. Cancellation is dropping the future.
pub struct LocationService {
    provider: Arc<dyn LocationProvider>,
    fallback: Option<Arc<dyn ApproximateLocator>>,
    timeout: Duration,
    max_age: Duration,
}

impl LocationService {
    pub fn new(
        provider: Arc<dyn LocationProvider>,
        fallback: Option<Arc<dyn ApproximateLocator>>,
    ) -> Self {
        let defaults = PositionRequest::default();
        Self {
            provider,
            fallback,
            timeout: defaults.timeout,
            max_age: defaults.max_age,
        }
    }

    /// Override the fix timeout (default 10 s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the cached-fix tolerance (default 5 min).
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Request one precise fix from the platform provider.
    ///
    /// The wait is bounded by the service itself: a provider that never
    /// answers is cut off with [`LocationError::Timeout`]. No automatic
    /// retry is performed.
    pub async fn get_current_location(&self) -> Result<LocationFix, LocationError> {
        let req = PositionRequest {
            timeout: self.timeout,
            max_age: self.max_age,
        };

        match tokio::time::timeout(self.timeout, self.provider.request_position(req)).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        }
    }

    /// Request a coarse fix from the fallback source.
    pub async fn get_approximate_location(&self) -> Result<LocationFix, LocationError> {
        let fallback = self.fallback.as_ref().ok_or_else(|| {
            LocationError::ApproximationFailed("no approximate locator configured".to_string())
        })?;

        match fallback.approximate_position().await {
            Ok(fix) => Ok(fix),
            Err(e @ LocationError::ApproximationFailed(_)) => Err(e),
            // Anything else from the fallback path is still an approximation
            // failure from the caller's point of view
            Err(e) => Err(LocationError::ApproximationFailed(e.to_string())),
        }
    }

    /// Full acquisition flow: precise attempt, then exactly one automatic
    /// fallback attempt.
    ///
    /// On precise failure the error kind is logged and the fallback is tried
    /// once; if that also fails, the fallback error is surfaced and no
    /// further retry happens. The outcome records whether the fallback was
    /// used so callers can render "approximate, lower confidence".
    pub async fn resolve(&self) -> Result<ResolvedLocation, LocationError> {
        match self.get_current_location().await {
            Ok(fix) => {
                tracing::debug!(
                    lat = fix.coordinate.lat,
                    lon = fix.coordinate.lon,
                    "precise position acquired"
                );
                Ok(ResolvedLocation {
                    fix,
                    fell_back: false,
                })
            }
            Err(precise_err) => {
                tracing::warn!(
                    kind = precise_err.kind(),
                    error = %precise_err,
                    "precise position failed, trying approximate fallback"
                );

                match self.get_approximate_location().await {
                    Ok(fix) => {
                        tracing::info!(
                            lat = fix.coordinate.lat,
                            lon = fix.coordinate.lon,
                            "approximate position acquired"
                        );
                        Ok(ResolvedLocation {
                            fix,
                            fell_back: true,
                        })
                    }
                    Err(fallback_err) => {
                        tracing::error!(
                            precise_kind = precise_err.kind(),
                            fallback = %fallback_err,
                            "location acquisition failed"
                        );
                        Err(fallback_err)
                    }
                }
            }
        }
    }

    /// Permission state of the precise provider.
    pub async fn permission_state(&self) -> PermissionState {
        self.provider.permission_state().await
    }
}

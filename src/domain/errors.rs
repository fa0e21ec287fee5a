//! Location error taxonomy
//!
//! Each kind maps to a distinct user-facing recovery action, so callers must
//! be able to tell them apart.

/// Failure kinds for location acquisition.
///
/// `PermissionDenied`, `PositionUnavailable`, `Timeout`, `Unsupported` and
/// `Unknown` come from the precise provider; `ApproximationFailed` comes
/// from the fallback path and is terminal for the acquisition flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied by the user")]
    PermissionDenied,
    #[error("provider could not determine a position")]
    PositionUnavailable,
    #[error("timed out waiting for a position fix")]
    Timeout,
    #[error("no location provider available on this platform")]
    Unsupported,
    #[error("approximate location lookup failed: {0}")]
    ApproximationFailed(String),
    #[error("location provider error: {0}")]
    Unknown(String),
}

impl LocationError {
    /// Stable machine-readable kind, used in API payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission_denied",
            Self::PositionUnavailable => "position_unavailable",
            Self::Timeout => "timeout",
            Self::Unsupported => "unsupported",
            Self::ApproximationFailed(_) => "approximation_failed",
            Self::Unknown(_) => "unknown",
        }
    }

    /// What the user should do next, per kind.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "enable location access in your device settings",
            Self::PositionUnavailable | Self::Timeout => {
                "retry, or continue with an approximate location"
            }
            Self::Unsupported => "enter your location manually",
            Self::ApproximationFailed(_) => "location unavailable; enter your location manually",
            Self::Unknown(_) => "retry in a moment",
        }
    }
}

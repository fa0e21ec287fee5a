//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees (WGS84).
///
/// Latitude is bounded to −90..90 and longitude to −180..180. Use
/// [`Coordinate::new`] to construct a validated coordinate; the raw struct
/// literal is available for deserialized data whose range is checked later
/// via [`Coordinate::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl Coordinate {
    /// Construct a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let c = Self { lat, lon };
        c.is_valid().then_some(c)
    }

    /// Whether both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Accuracy tier of a resolved position.
///
/// `Precise` fixes come from a high-accuracy platform provider and carry the
/// provider's accuracy radius. `Approximate` fixes come from coarse fallback
/// methods (IP geolocation, GeoIP databases) with no accuracy guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "lowercase")]
pub enum Accuracy {
    /// High-accuracy fix with the provider's reported radius in meters.
    Precise { accuracy_m: f64 },
    /// Coarse fix, city-level at best.
    Approximate,
}

impl Accuracy {
    pub fn is_precise(&self) -> bool {
        matches!(self, Accuracy::Precise { .. })
    }

    /// Short label for logs and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accuracy::Precise { .. } => "precise",
            Accuracy::Approximate => "approximate",
        }
    }
}

/// Result of querying the platform's location permission.
///
/// `Prompt` means the user has not decided yet; callers use it to decide
/// whether to request a fix proactively or show an "enable location" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

impl Default for PermissionState {
    fn default() -> Self {
        Self::Prompt
    }
}

impl PermissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
        }
    }
}

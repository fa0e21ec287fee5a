//! Nearby Service - main application use case
//!
//! Orchestrates the nearby-supplier query: resolving an origin, reading the
//! catalog, and running the distance filter. This is the primary interface
//! for the inbound adapter.

use crate::application::location_service::LocationService;
use crate::domain::entities::NearbySupplier;
use crate::domain::errors::LocationError;
use crate::domain::ports::SupplierCatalog;
use crate::domain::services::NearbyFilter;
use crate::domain::value_objects::{Accuracy, Coordinate};
use serde::Serialize;
use std::sync::Arc;

/// A nearby-supplier query.
#[derive(Debug, Clone, Default)]
pub struct NearbyQuery {
    /// Caller-supplied origin; when absent the location service resolves one
    pub origin: Option<Coordinate>,
    /// Search radius; when absent the configured default applies
    pub radius_km: Option<f64>,
    /// Optional category narrowing (`"all"` keeps every category)
    pub category: Option<String>,
}

/// How the origin of a query was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginSource {
    /// Caller passed explicit coordinates
    Supplied,
    /// Precise platform fix
    Precise,
    /// Coarse fallback fix
    Approximate,
}

impl OriginSource {
    fn from_accuracy(accuracy: Accuracy) -> Self {
        match accuracy {
            Accuracy::Precise { .. } => Self::Precise,
            Accuracy::Approximate => Self::Approximate,
        }
    }
}

/// Result of a nearby query: the origin actually used plus the sorted,
/// radius-filtered supplier list.
#[derive(Debug, Clone)]
pub struct NearbyOutcome {
    pub origin: Coordinate,
    pub origin_source: OriginSource,
    pub radius_km: f64,
    pub results: Vec<NearbySupplier>,
}

/// Nearby-supplier search service.
///
/// `find_nearby` is the one suspension point (origin resolution); the filter
/// itself is pure and synchronous. Safe to share behind an `Arc` and call
/// concurrently.
pub struct NearbyService {
    location: Arc<LocationService>,
    catalog: Arc<dyn SupplierCatalog>,
    default_radius_km: f64,
}

impl NearbyService {
    pub fn new(
        location: Arc<LocationService>,
        catalog: Arc<dyn SupplierCatalog>,
        default_radius_km: f64,
    ) -> Self {
        Self {
            location,
            catalog,
            default_radius_km,
        }
    }

    /// Execute a nearby query.
    ///
    /// A caller-supplied origin is used as-is; otherwise the location
    /// service resolves one (precise, then one approximate fallback
    /// attempt). Location errors propagate; an empty catalog is not an
    /// error.
    pub async fn find_nearby(&self, query: NearbyQuery) -> Result<NearbyOutcome, LocationError> {
        let (origin, origin_source) = match query.origin {
            Some(coordinate) => (coordinate, OriginSource::Supplied),
            None => {
                let resolved = self.location.resolve().await?;
                (
                    resolved.fix.coordinate,
                    OriginSource::from_accuracy(resolved.fix.accuracy),
                )
            }
        };

        let radius_km = query.radius_km.unwrap_or(self.default_radius_km);
        let suppliers = self.catalog.get_all().await;

        let results =
            NearbyFilter::find_nearby(origin, &suppliers, radius_km, query.category.as_deref());

        tracing::debug!(
            origin = %origin,
            radius_km,
            candidates = suppliers.len(),
            matches = results.len(),
            "nearby query served"
        );

        Ok(NearbyOutcome {
            origin,
            origin_source,
            radius_km,
            results,
        })
    }

    /// The location service, for callers that need the resolution flow alone.
    pub fn location(&self) -> &Arc<LocationService> {
        &self.location
    }
}

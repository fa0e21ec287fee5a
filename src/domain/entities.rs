//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the Supply Setu nearby
//! domain. They have no external dependencies and contain only business logic.

use crate::domain::value_objects::{Accuracy, Coordinate};
use serde::{Deserialize, Serialize};

/// A raw-material supplier record, owned by an external catalog.
///
/// Supplier data arrives from outside the core (a catalog service, a seed
/// file, a registration call) and is expected to be incomplete at times:
/// latitude/longitude may be missing or out of range. The core never mutates
/// a supplier; it only reads the coordinate and attaches a derived distance
/// to a copy for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier for this supplier
    pub id: String,
    /// Display name
    pub name: String,
    /// Category tag (vegetables, spices, dairy, grains, oils, ...)
    pub category: String,
    /// Latitude in degrees, if known
    pub lat: Option<f64>,
    /// Longitude in degrees, if known
    pub lon: Option<f64>,
    /// Average vendor rating, if any
    #[serde(default)]
    pub rating: Option<f64>,
    /// Free-form specialties shown on the supplier card
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Product names offered
    #[serde(default)]
    pub products: Vec<String>,
    /// Contact info (phone or address line)
    #[serde(default)]
    pub contact: Option<String>,
}

impl Supplier {
    /// The supplier's coordinate, if present and inside the valid ranges.
    ///
    /// Returns `None` for missing or malformed location data so callers can
    /// skip the record instead of failing the whole operation.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => None,
        }
    }

    /// Case-insensitive category match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

/// A supplier annotated with its distance from the query origin.
///
/// Created fresh on every filter invocation and never cached. `distance_km`
/// is rounded to two decimals for display; the ordering produced by the
/// filter is non-decreasing in this field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySupplier {
    #[serde(flatten)]
    pub supplier: Supplier,
    /// Great-circle distance from the origin, in kilometers
    pub distance_km: f64,
}

/// A resolved position: coordinate plus accuracy tier.
///
/// Produced once per location request and discarded after use; the core
/// keeps no last-known-position global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub accuracy: Accuracy,
}

impl LocationFix {
    /// A fix from a high-accuracy provider.
    pub fn precise(coordinate: Coordinate, accuracy_m: f64) -> Self {
        Self {
            coordinate,
            accuracy: Accuracy::Precise { accuracy_m },
        }
    }

    /// A fix from a coarse fallback source.
    pub fn approximate(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            accuracy: Accuracy::Approximate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_supplier(id: &str, lat: Option<f64>, lon: Option<f64>) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {}", id),
            category: "vegetables".to_string(),
            lat,
            lon,
            rating: Some(4.2),
            specialties: vec!["fresh produce".to_string()],
            products: vec!["onion".to_string(), "tomato".to_string()],
            contact: None,
        }
    }

    // ===== Supplier Coordinate Tests =====

    #[test]
    fn test_supplier_coordinate_present() {
        let s = create_supplier("s1", Some(28.7), Some(77.1));
        let c = s.coordinate().unwrap();
        assert_eq!(c.lat, 28.7);
        assert_eq!(c.lon, 77.1);
    }

    #[test]
    fn test_supplier_coordinate_missing_lat() {
        let s = create_supplier("s1", None, Some(77.1));
        assert!(s.coordinate().is_none());
    }

    #[test]
    fn test_supplier_coordinate_missing_both() {
        let s = create_supplier("s1", None, None);
        assert!(s.coordinate().is_none());
    }

    #[test]
    fn test_supplier_coordinate_out_of_range() {
        let s = create_supplier("s1", Some(123.0), Some(77.1));
        assert!(s.coordinate().is_none());
    }

    // ===== Supplier Category Tests =====

    #[test]
    fn test_supplier_in_category_case_insensitive() {
        let s = create_supplier("s1", Some(28.7), Some(77.1));
        assert!(s.in_category("vegetables"));
        assert!(s.in_category("Vegetables"));
        assert!(s.in_category("VEGETABLES"));
        assert!(!s.in_category("spices"));
    }

    // ===== Supplier Deserialization Tests =====

    #[test]
    fn test_supplier_deserialize_minimal() {
        let json = r#"{"id":"s1","name":"Sharma","category":"vegetables","lat":28.7,"lon":77.1}"#;
        let s: Supplier = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "s1");
        assert!(s.specialties.is_empty());
        assert!(s.products.is_empty());
        assert!(s.rating.is_none());
        assert!(s.contact.is_none());
    }

    #[test]
    fn test_supplier_deserialize_null_coordinates() {
        let json = r#"{"id":"s1","name":"Sharma","category":"vegetables","lat":null,"lon":null}"#;
        let s: Supplier = serde_json::from_str(json).unwrap();
        assert!(s.coordinate().is_none());
    }

    // ===== NearbySupplier Tests =====

    #[test]
    fn test_nearby_supplier_serializes_flat() {
        let near = NearbySupplier {
            supplier: create_supplier("s1", Some(28.7), Some(77.1)),
            distance_km: 3.03,
        };
        let json = serde_json::to_value(&near).unwrap();
        // Flattened: supplier fields and distance_km at the same level
        assert_eq!(json["id"], "s1");
        assert_eq!(json["distance_km"], 3.03);
    }

    // ===== LocationFix Tests =====

    #[test]
    fn test_location_fix_precise() {
        let fix = LocationFix::precise(Coordinate::new(28.7, 77.1).unwrap(), 15.0);
        assert!(fix.accuracy.is_precise());
        assert_eq!(fix.coordinate.lat, 28.7);
    }

    #[test]
    fn test_location_fix_approximate() {
        let fix = LocationFix::approximate(Coordinate::new(28.7, 77.1).unwrap());
        assert!(!fix.accuracy.is_precise());
        assert_eq!(fix.accuracy.as_str(), "approximate");
    }
}

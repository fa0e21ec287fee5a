//! Nearby Filter Service
//!
//! Pure domain logic for selecting suppliers within a radius of an origin.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::entities::{NearbySupplier, Supplier};
use crate::domain::services::distance::distance_km;
use crate::domain::value_objects::Coordinate;

/// Category sentinel meaning "do not narrow by category".
const ALL_CATEGORIES: &str = "all";

/// Delivery ETA bands, keyed by exclusive upper bound in kilometers.
/// Business configuration, not a model.
const DELIVERY_BANDS: [(f64, &str); 3] = [
    (2.0, "15-30 mins"),
    (5.0, "30-45 mins"),
    (10.0, "45-60 mins"),
];
const DELIVERY_BAND_FAR: &str = "1-2 hours";

/// Nearby filter service for radius queries over supplier lists.
///
/// Suppliers without a usable coordinate are skipped silently: incomplete
/// external data is expected, and one bad record must not block the rest of
/// the result.
pub struct NearbyFilter;

impl NearbyFilter {
    /// Suppliers within `radius_km` of `origin`, sorted by ascending distance.
    ///
    /// # Arguments
    /// * `origin` - Center of the search
    /// * `suppliers` - Candidate records, owned by an external catalog
    /// * `radius_km` - Inclusive maximum distance
    /// * `category` - Optional category narrowing (case-insensitive; `None`
    ///   or `"all"` keeps every category)
    ///
    /// # Returns
    /// Possibly empty list of suppliers annotated with `distance_km`
    /// (two-decimal display precision). Ties keep their input order.
    pub fn find_nearby(
        origin: Coordinate,
        suppliers: &[Supplier],
        radius_km: f64,
        category: Option<&str>,
    ) -> Vec<NearbySupplier> {
        let category = category.filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES));

        let mut matches: Vec<(f64, &Supplier)> = suppliers
            .iter()
            .filter_map(|s| {
                let coord = s.coordinate()?;
                let d = distance_km(origin, coord);
                (d <= radius_km).then_some((d, s))
            })
            .filter(|(_, s)| category.map_or(true, |c| s.in_category(c)))
            .collect();

        // Stable sort keeps input order for equal distances
        matches.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        matches
            .into_iter()
            .map(|(d, s)| NearbySupplier {
                supplier: s.clone(),
                distance_km: round2(d),
            })
            .collect()
    }
}

fn round2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Render a distance for display: meters under one kilometer, otherwise
/// one-decimal kilometers.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", km)
    }
}

/// Coarse delivery-time estimate for a distance, from the band table.
pub fn estimated_delivery_time(km: f64) -> &'static str {
    for (bound, label) in DELIVERY_BANDS {
        if km <= bound {
            return label;
        }
    }
    DELIVERY_BAND_FAR
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Test Helpers =====

    fn create_supplier(id: &str, category: &str, lat: f64, lon: f64) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {}", id),
            category: category.to_string(),
            lat: Some(lat),
            lon: Some(lon),
            rating: None,
            specialties: Vec::new(),
            products: Vec::new(),
            contact: None,
        }
    }

    fn supplier_without_location(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {}", id),
            category: "vegetables".to_string(),
            lat: None,
            lon: None,
            rating: None,
            specialties: Vec::new(),
            products: Vec::new(),
            contact: None,
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(28.70, 77.10).unwrap()
    }

    /// Six Delhi-area fixtures with independently computed distances from
    /// the (28.70, 77.10) origin.
    fn delhi_fixtures() -> Vec<Supplier> {
        vec![
            // 33.78 km
            create_supplier("noida-oil", "oils", 28.5355, 77.3910),
            // 0.52 km
            create_supplier("sharma-veg", "vegetables", 28.7041, 77.1025),
            // 10.36 km - just outside a 10 km radius
            create_supplier("karol-grain", "grains", 28.6519, 77.1909),
            // 3.03 km
            create_supplier("pitampura-spice", "spices", 28.6980, 77.1310),
            // 7.59 km
            create_supplier("azadpur-veg", "vegetables", 28.7196, 77.1746),
            // 4.58 km
            create_supplier("rohini-dairy", "dairy", 28.7380, 77.0820),
        ]
    }

    // ===== Radius Filtering Tests =====

    #[test]
    fn test_find_nearby_respects_radius() {
        let suppliers = delhi_fixtures();
        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);

        assert_eq!(results.len(), 4);
        for r in &results {
            assert!(r.distance_km <= 10.0);
        }
    }

    #[test]
    fn test_find_nearby_sorted_ascending() {
        let suppliers = delhi_fixtures();
        let results = NearbyFilter::find_nearby(origin(), &suppliers, 50.0, None);

        assert_eq!(results.len(), 6);
        for pair in results.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_find_nearby_end_to_end_oracle() {
        // Oracle computed analytically: distances from (28.70, 77.10)
        let suppliers = delhi_fixtures();
        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("all"));

        let ids: Vec<&str> = results.iter().map(|r| r.supplier.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["sharma-veg", "pitampura-spice", "rohini-dairy", "azadpur-veg"]
        );

        assert!((results[0].distance_km - 0.52).abs() < 0.01);
        assert!((results[1].distance_km - 3.03).abs() < 0.01);
        assert!((results[2].distance_km - 4.58).abs() < 0.01);
        assert!((results[3].distance_km - 7.59).abs() < 0.01);
    }

    #[test]
    fn test_find_nearby_radius_zero_includes_exact_match() {
        // Boundary is inclusive: a supplier exactly at the origin survives r=0
        let mut suppliers = delhi_fixtures();
        suppliers.push(create_supplier("at-origin", "vegetables", 28.70, 77.10));

        let results = NearbyFilter::find_nearby(origin(), &suppliers, 0.0, None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].supplier.id, "at-origin");
        assert_eq!(results[0].distance_km, 0.0);
    }

    // ===== Category Filtering Tests =====

    #[test]
    fn test_find_nearby_category_filter() {
        let suppliers = delhi_fixtures();
        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("vegetables"));

        let ids: Vec<&str> = results.iter().map(|r| r.supplier.id.as_str()).collect();
        assert_eq!(ids, vec!["sharma-veg", "azadpur-veg"]);
    }

    #[test]
    fn test_find_nearby_category_case_insensitive() {
        let suppliers = delhi_fixtures();
        let lower = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("spices"));
        let upper = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("SPICES"));

        assert_eq!(lower.len(), 1);
        assert_eq!(upper.len(), 1);
        assert_eq!(lower[0].supplier.id, upper[0].supplier.id);
    }

    #[test]
    fn test_find_nearby_category_all_sentinel() {
        let suppliers = delhi_fixtures();
        let all = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("all"));
        let none = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);

        assert_eq!(all.len(), none.len());
    }

    #[test]
    fn test_find_nearby_category_no_match() {
        let suppliers = delhi_fixtures();
        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, Some("seafood"));
        assert!(results.is_empty());
    }

    // ===== Malformed Data Tests =====

    #[test]
    fn test_find_nearby_skips_missing_coordinates() {
        let mut suppliers = delhi_fixtures();
        suppliers.insert(0, supplier_without_location("no-loc"));

        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.supplier.id != "no-loc"));
    }

    #[test]
    fn test_find_nearby_skips_out_of_range_coordinates() {
        let mut suppliers = delhi_fixtures();
        suppliers.push(create_supplier("bad-coords", "vegetables", 123.0, 999.0));

        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);
        assert!(results.iter().all(|r| r.supplier.id != "bad-coords"));
    }

    #[test]
    fn test_find_nearby_empty_input() {
        let results = NearbyFilter::find_nearby(origin(), &[], 10.0, None);
        assert!(results.is_empty());
    }

    // ===== Ordering Stability Tests =====

    #[test]
    fn test_find_nearby_ties_keep_input_order() {
        // Two suppliers at the same point: input order must be preserved
        let suppliers = vec![
            create_supplier("first", "vegetables", 28.7041, 77.1025),
            create_supplier("second", "spices", 28.7041, 77.1025),
        ];

        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);
        assert_eq!(results[0].supplier.id, "first");
        assert_eq!(results[1].supplier.id, "second");
    }

    #[test]
    fn test_find_nearby_order_independent_of_input_order() {
        let mut suppliers = delhi_fixtures();
        suppliers.reverse();

        let results = NearbyFilter::find_nearby(origin(), &suppliers, 10.0, None);
        let ids: Vec<&str> = results.iter().map(|r| r.supplier.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["sharma-veg", "pitampura-spice", "rohini-dairy", "azadpur-veg"]
        );
    }

    // ===== format_distance Tests =====

    #[test]
    fn test_format_distance_meters() {
        assert_eq!(format_distance(0.35), "350m");
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(0.999), "999m");
    }

    #[test]
    fn test_format_distance_kilometers() {
        assert_eq!(format_distance(3.8), "3.8km");
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(10.36), "10.4km");
    }

    // ===== estimated_delivery_time Tests =====

    #[test]
    fn test_delivery_time_bands() {
        assert_eq!(estimated_delivery_time(0.5), "15-30 mins");
        assert_eq!(estimated_delivery_time(1.5), "15-30 mins");
        assert_eq!(estimated_delivery_time(2.0), "15-30 mins");
        assert_eq!(estimated_delivery_time(3.5), "30-45 mins");
        assert_eq!(estimated_delivery_time(5.0), "30-45 mins");
        assert_eq!(estimated_delivery_time(7.0), "45-60 mins");
        assert_eq!(estimated_delivery_time(10.0), "45-60 mins");
        assert_eq!(estimated_delivery_time(10.1), "1-2 hours");
        assert_eq!(estimated_delivery_time(100.0), "1-2 hours");
    }
}

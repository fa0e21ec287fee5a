//! MaxMind GeoIP Locator
//!
//! Resolves client IP addresses to approximate coordinates using a MaxMind
//! GeoLite2-City database file.

use crate::domain::entities::LocationFix;
use crate::domain::value_objects::Coordinate;
use maxminddb::Reader;
use serde::Deserialize;
use std::net::IpAddr;
use std::sync::Arc;

/// GeoIP-based approximate locator for API clients.
///
/// Unlike the IP-geolocation service adapter, this one works offline against
/// a database file and resolves arbitrary client addresses, so the API layer
/// can derive a per-request origin from the caller's IP. City-level accuracy
/// at best.
pub struct MaxMindLocator {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindLocator {
    /// Load a GeoLite2-City database from a file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Resolve an IP address to an approximate fix.
    ///
    /// Returns `None` for addresses absent from the database (private
    /// ranges, loopback) or records without coordinates.
    pub fn locate(&self, ip: IpAddr) -> Option<LocationFix> {
        #[derive(Debug, Deserialize)]
        struct DbLocation {
            latitude: Option<f64>,
            longitude: Option<f64>,
        }

        #[derive(Debug, Deserialize)]
        struct CityResp {
            location: Option<DbLocation>,
        }

        let resp: CityResp = self.reader.lookup(ip).ok()?;
        let location = resp.location?;

        let coordinate = Coordinate::new(location.latitude?, location.longitude?)?;

        tracing::debug!(%ip, lat = coordinate.lat, lon = coordinate.lon, "geoip lookup hit");

        Some(LocationFix::approximate(coordinate))
    }
}

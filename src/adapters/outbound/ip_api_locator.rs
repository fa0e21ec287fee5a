//! IP Geolocation Locator
//!
//! Implements ApproximateLocator against an ip-api.com style JSON endpoint.

use crate::domain::entities::LocationFix;
use crate::domain::errors::LocationError;
use crate::domain::ports::ApproximateLocator;
use crate::domain::value_objects::Coordinate;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of the ip-api JSON endpoint.
///
/// `status` is `"success"` or `"fail"`; coordinates are absent on failure.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// IP-geolocation fallback locator.
///
/// Calls a public IP-geolocation service to geolocate the host's egress IP
/// at city granularity. The endpoint is configurable so tests can point it
/// at a mock server.
pub struct IpApiLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl IpApiLocator {
    /// Default request timeout for the geolocation call.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(endpoint: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ApproximateLocator for IpApiLocator {
    async fn approximate_position(&self) -> Result<LocationFix, LocationError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| LocationError::ApproximationFailed(format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(LocationError::ApproximationFailed(format!(
                "service returned {}",
                resp.status()
            )));
        }

        let body: IpApiResponse = resp
            .json()
            .await
            .map_err(|e| LocationError::ApproximationFailed(format!("bad response: {}", e)))?;

        if body.status != "success" {
            return Err(LocationError::ApproximationFailed(
                body.message
                    .unwrap_or_else(|| "service reported failure".to_string()),
            ));
        }

        let coordinate = match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok_or_else(|| {
                LocationError::ApproximationFailed(format!(
                    "coordinates out of range: ({}, {})",
                    lat, lon
                ))
            })?,
            _ => {
                return Err(LocationError::ApproximationFailed(
                    "response missing coordinates".to_string(),
                ))
            }
        };

        tracing::info!(
            lat = coordinate.lat,
            lon = coordinate.lon,
            city = body.city.as_deref().unwrap_or("?"),
            country = body.country.as_deref().unwrap_or("?"),
            "ip geolocation resolved"
        );

        Ok(LocationFix::approximate(coordinate))
    }
}

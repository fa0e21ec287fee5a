//! Supply Setu nearby service - composition root
//!
//! Wires the location providers, supplier catalog and API server together.

mod adapters;
mod application;
mod config;
mod domain;

use crate::adapters::inbound::{ApiServer, ApiState};
use crate::adapters::outbound::{
    CachedLocationProvider, FixedLocationProvider, HttpSupplierCatalog, IpApiLocator,
    MaxMindLocator, MemorySupplierCatalog, UnsupportedLocationProvider,
};
use crate::application::{LocationService, NearbyService};
use crate::config::load_config;
use crate::domain::ports::{ApproximateLocator, LocationProvider, SupplierCatalog};
use crate::domain::value_objects::Coordinate;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting setu-nearby listen={} radius_km={}",
        cfg.api_listen_addr,
        cfg.default_radius_km
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // 1. Precise location provider: fixed kiosk position when configured,
    //    otherwise no platform sensor on a headless install
    let provider: Arc<dyn LocationProvider> = match (cfg.fixed_lat, cfg.fixed_lon) {
        (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
            Some(coordinate) => {
                tracing::info!(lat, lon, "using fixed location provider");
                Arc::new(FixedLocationProvider::new(coordinate))
            }
            None => {
                anyhow::bail!("SETU_FIXED_LAT/SETU_FIXED_LON out of range: ({}, {})", lat, lon)
            }
        },
        _ => Arc::new(UnsupportedLocationProvider),
    };
    let provider = Arc::new(CachedLocationProvider::new(provider));

    // 2. Approximate fallback: IP geolocation service
    let fallback: Arc<dyn ApproximateLocator> =
        Arc::new(IpApiLocator::new(cfg.ip_api_url.clone())?);

    let location = Arc::new(
        LocationService::new(provider, Some(fallback))
            .with_timeout(Duration::from_secs(cfg.location_timeout_secs))
            .with_max_age(Duration::from_secs(cfg.location_max_age_secs)),
    );

    // 3. Supplier catalog: remote service when configured, otherwise the
    //    in-memory registry seeded from the suppliers file
    let (catalog, registry): (Arc<dyn SupplierCatalog>, Option<Arc<MemorySupplierCatalog>>) =
        match &cfg.catalog_url {
            Some(url) => {
                tracing::info!(%url, "using remote supplier catalog");
                (Arc::new(HttpSupplierCatalog::new(url.clone())?), None)
            }
            None => {
                let registry = Arc::new(MemorySupplierCatalog::new());
                registry.start_file_sync(cfg.suppliers_path.clone(), cfg.catalog_reload_secs);
                (registry.clone(), Some(registry))
            }
        };

    // 4. Optional GeoIP resolver for per-client origins
    let geoip = match &cfg.geoip_path {
        Some(path) => {
            let locator = MaxMindLocator::from_file(path)?;
            tracing::info!(%path, "geoip database loaded");
            Some(Arc::new(locator))
        }
        None => None,
    };

    // 5. Application service + inbound adapter
    let nearby = Arc::new(NearbyService::new(location, catalog, cfg.default_radius_km));

    let server = ApiServer::new(
        cfg.api_listen_addr.clone(),
        ApiState {
            nearby,
            registry,
            geoip,
        },
    );

    server.run().await
}

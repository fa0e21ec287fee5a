//! Nearby API Server
//!
//! HTTP API for vendor clients: nearby-supplier search, location resolution
//! and supplier registration. The single-page frontend is the main consumer.

use crate::adapters::outbound::{MaxMindLocator, MemorySupplierCatalog};
use crate::application::{NearbyQuery, NearbyService, OriginSource};
use crate::domain::entities::{NearbySupplier, Supplier};
use crate::domain::errors::LocationError;
use crate::domain::ports::SupplierCatalog;
use crate::domain::services::{estimated_delivery_time, format_distance};
use crate::domain::value_objects::{Accuracy, Coordinate};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Query parameters for the nearby endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius_km: Option<f64>,
    pub category: Option<String>,
}

/// Registration request for a supplier.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub registered: bool,
}

/// One nearby result with presentation fields attached.
#[derive(Debug, Serialize)]
pub struct NearbyEntry {
    #[serde(flatten)]
    pub result: NearbySupplier,
    /// Human-readable distance ("350m", "3.8km")
    pub distance_label: String,
    /// Coarse delivery ETA band
    pub delivery_eta: &'static str,
}

/// Nearby search response.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub origin: Coordinate,
    pub origin_source: &'static str,
    pub radius_km: f64,
    pub count: usize,
    pub suppliers: Vec<NearbyEntry>,
}

/// Location resolution response.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub lat: f64,
    pub lon: f64,
    pub accuracy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
}

/// Permission query response.
#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub permission: &'static str,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub suppliers: usize,
}

/// Structured error payload with a per-kind recovery hint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub hint: String,
}

impl ErrorResponse {
    fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message.to_string(),
                kind: "invalid_request".to_string(),
                hint: "check the query parameters".to_string(),
            }),
        )
    }

    fn from_location_error(e: &LocationError) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.to_string(),
                kind: e.kind().to_string(),
                hint: e.recovery_hint().to_string(),
            }),
        )
    }
}

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    pub nearby: Arc<NearbyService>,
    /// Registry for the registration endpoints; absent when the catalog is
    /// served by a remote service
    pub registry: Option<Arc<MemorySupplierCatalog>>,
    /// Optional GeoIP resolver for per-client approximate origins
    pub geoip: Option<Arc<MaxMindLocator>>,
}

/// Nearby API server.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
}

impl ApiServer {
    pub fn new(listen_addr: String, state: ApiState) -> Self {
        Self { listen_addr, state }
    }

    /// Build the router; exposed separately so tests can drive it in-process.
    pub fn router(state: ApiState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/v1/nearby", get(nearby_handler))
            .route("/api/v1/location", get(location_handler))
            .route("/api/v1/location/permission", get(permission_handler))
            .route(
                "/api/v1/suppliers",
                get(list_suppliers_handler).post(register_handler),
            )
            .route("/api/v1/suppliers/:id", delete(deregister_handler))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Run the API server until ctrl-c.
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = Self::router(self.state.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("nearby API listening on {}", self.listen_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

/// First address in X-Forwarded-For, if parseable.
///
/// Deployments sit behind a reverse proxy that sets the header; direct
/// connections without it simply skip the GeoIP origin path.
fn client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let suppliers = match &state.registry {
        Some(registry) => registry.len(),
        None => 0,
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        suppliers,
    })
}

async fn nearby_handler(
    State(state): State<ApiState>,
    Query(params): Query<NearbyParams>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(radius) = params.radius_km {
        if !radius.is_finite() || radius < 0.0 {
            return ErrorResponse::bad_request("radius_km must be a non-negative number")
                .into_response();
        }
    }

    // Origin precedence: explicit params, then GeoIP on the client address,
    // then the location service's resolve flow.
    let (origin, geoip_origin) = match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => match Coordinate::new(lat, lon) {
            Some(c) => (Some(c), false),
            None => {
                return ErrorResponse::bad_request("lat must be in -90..90 and lon in -180..180")
                    .into_response()
            }
        },
        (None, None) => {
            let geoip_fix = state
                .geoip
                .as_ref()
                .and_then(|geoip| client_ip(&headers).and_then(|ip| geoip.locate(ip)));
            match geoip_fix {
                Some(fix) => (Some(fix.coordinate), true),
                None => (None, false),
            }
        }
        _ => {
            return ErrorResponse::bad_request("lat and lon must be provided together")
                .into_response()
        }
    };

    let query = NearbyQuery {
        origin,
        radius_km: params.radius_km,
        category: params.category,
    };

    match state.nearby.find_nearby(query).await {
        Ok(outcome) => {
            let origin_source = if geoip_origin {
                "approximate"
            } else {
                match outcome.origin_source {
                    OriginSource::Supplied => "supplied",
                    OriginSource::Precise => "precise",
                    OriginSource::Approximate => "approximate",
                }
            };

            let suppliers: Vec<NearbyEntry> = outcome
                .results
                .into_iter()
                .map(|result| NearbyEntry {
                    distance_label: format_distance(result.distance_km),
                    delivery_eta: estimated_delivery_time(result.distance_km),
                    result,
                })
                .collect();

            Json(NearbyResponse {
                origin: outcome.origin,
                origin_source,
                radius_km: outcome.radius_km,
                count: suppliers.len(),
                suppliers,
            })
            .into_response()
        }
        Err(e) => ErrorResponse::from_location_error(&e).into_response(),
    }
}

async fn location_handler(State(state): State<ApiState>) -> impl IntoResponse {
    match state.nearby.location().resolve().await {
        Ok(resolved) => {
            let accuracy_m = match resolved.fix.accuracy {
                Accuracy::Precise { accuracy_m } => Some(accuracy_m),
                Accuracy::Approximate => None,
            };

            Json(LocationResponse {
                lat: resolved.fix.coordinate.lat,
                lon: resolved.fix.coordinate.lon,
                accuracy: resolved.fix.accuracy.as_str(),
                accuracy_m,
            })
            .into_response()
        }
        Err(e) => ErrorResponse::from_location_error(&e).into_response(),
    }
}

async fn permission_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let permission = state.nearby.location().permission_state().await;
    Json(PermissionResponse {
        permission: permission.as_str(),
    })
}

async fn list_suppliers_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let suppliers = match &state.registry {
        Some(registry) => registry.get_all().await,
        None => Vec::new(),
    };
    Json(suppliers)
}

async fn register_handler(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    let Some(registry) = &state.registry else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "registration disabled: catalog is served remotely".to_string(),
                kind: "registration_disabled".to_string(),
                hint: "register suppliers with the catalog service".to_string(),
            }),
        )
            .into_response();
    };

    if req.name.trim().is_empty() || req.category.trim().is_empty() {
        return ErrorResponse::bad_request("name and category are required").into_response();
    }

    let supplier = Supplier {
        id: req.id.unwrap_or_default(),
        name: req.name,
        category: req.category,
        lat: req.lat,
        lon: req.lon,
        rating: req.rating,
        specialties: req.specialties,
        products: req.products,
        contact: req.contact,
    };

    let registered = registry.register(supplier);
    tracing::info!(id = %registered.id, name = %registered.name, "supplier registered");

    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: registered.id,
            registered: true,
        }),
    )
        .into_response()
}

async fn deregister_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(registry) = &state.registry else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    if registry.deregister(&id) {
        tracing::info!(%id, "supplier deregistered");
        StatusCode::NO_CONTENT.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

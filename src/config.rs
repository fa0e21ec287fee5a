use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // API server settings
    pub api_listen_addr: String,
    pub debug: bool,

    // Supplier catalog settings
    pub suppliers_path: String,
    pub catalog_url: Option<String>,
    pub catalog_reload_secs: u64,

    // Location settings
    pub location_timeout_secs: u64,
    pub location_max_age_secs: u64,
    pub default_radius_km: f64,
    pub ip_api_url: String,
    pub geoip_path: Option<String>,
    pub fixed_lat: Option<f64>,
    pub fixed_lon: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_listen_addr: "0.0.0.0:8080".to_string(),
            debug: false,
            suppliers_path: "data/suppliers.json".to_string(),
            catalog_url: None,
            catalog_reload_secs: 30,
            location_timeout_secs: 10,
            location_max_age_secs: 300,
            default_radius_km: 10.0,
            ip_api_url: "http://ip-api.com/json".to_string(),
            geoip_path: None,
            fixed_lat: None,
            fixed_lon: None,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let api_listen_addr =
        std::env::var("SETU_API_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    let suppliers_path =
        std::env::var("SETU_SUPPLIERS_PATH").unwrap_or_else(|_| "data/suppliers.json".to_string());

    let catalog_url = std::env::var("SETU_CATALOG_URL").ok();

    let catalog_reload_secs = std::env::var("SETU_CATALOG_RELOAD_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .unwrap_or(30);

    let location_timeout_secs = std::env::var("SETU_LOCATION_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    let location_max_age_secs = std::env::var("SETU_LOCATION_MAX_AGE_SECS")
        .unwrap_or_else(|_| "300".to_string())
        .parse()
        .unwrap_or(300);

    let default_radius_km = std::env::var("SETU_DEFAULT_RADIUS_KM")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10.0);

    let ip_api_url =
        std::env::var("SETU_IP_API_URL").unwrap_or_else(|_| "http://ip-api.com/json".to_string());

    let geoip_path = std::env::var("SETU_GEOIP_PATH").ok();

    let fixed_lat = std::env::var("SETU_FIXED_LAT").ok().and_then(|v| v.parse().ok());
    let fixed_lon = std::env::var("SETU_FIXED_LON").ok().and_then(|v| v.parse().ok());

    Ok(Config {
        api_listen_addr,
        debug,
        suppliers_path,
        catalog_url,
        catalog_reload_secs,
        location_timeout_secs,
        location_max_age_secs,
        default_radius_km,
        ip_api_url,
        geoip_path,
        fixed_lat,
        fixed_lon,
    })
}

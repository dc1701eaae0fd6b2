//! Geocoding Service
//!
//! Google Maps 地理编码。任何失败 (非 OK 状态、传输错误、未配置密钥)
//! 都折叠为 `None`，不向调用方抛错。

use serde::Deserialize;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Address-to-coordinates lookup backed by the Google Maps API.
#[derive(Clone)]
pub struct GeocodeService {
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GeocodeService {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Look up coordinates for an address.
    pub async fn lookup(&self, address: &str) -> Option<(f64, f64)> {
        let api_key = self.api_key.as_deref()?;

        let resp = match self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", address), ("key", api_key)])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(address, error = %e, "Geocoding request failed");
                return None;
            }
        };

        let body: GeocodeResponse = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(address, error = %e, "Invalid geocoding response");
                return None;
            }
        };

        if body.status != "OK" {
            tracing::debug!(address, status = %body.status, "Geocoding returned non-OK status");
            return None;
        }

        body.results
            .first()
            .map(|r| (r.geometry.location.lat, r.geometry.location.lng))
    }
}

// ── Geolocation client ──
//
// One-shot IP-based position lookup. Failure here is normal (offline,
// rate-limited, behind a VPN) -- callers fall back to a configured
// reference position.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Default public IP-geolocation endpoint.
pub const DEFAULT_GEO_URL: &str = "https://ipapi.co/json/";

/// A resolved reference position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    latitude: f64,
    longitude: f64,
}

/// HTTP client for the geolocation collaborator.
pub struct GeoClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GeoClient {
    pub fn new(endpoint: Url, timeout: std::time::Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Resolve the current position once.
    pub async fn locate(&self) -> Result<Position, Error> {
        let resp = self.http.get(self.endpoint.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(Error::Geolocation {
                message: format!("HTTP {status}: {preview}"),
            });
        }

        let body = resp.text().await?;
        let geo: GeoResponse = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })?;

        debug!(lat = geo.latitude, lng = geo.longitude, "position resolved");
        Ok(Position {
            lat: geo.latitude,
            lng: geo.longitude,
        })
    }
}

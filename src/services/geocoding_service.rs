use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::Degraded;

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

pub type Coordinates = (f64, f64);

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: Option<GeocodeStatus>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeStatus {
    code: u16,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

/// Forward-geocoding client backed by the OpenCage API.
#[derive(Clone)]
pub struct GeocodingService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::builder().timeout(GEOCODE_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key: config.opencage_api_key.clone(),
            base_url: config.opencage_base_url.clone(),
        })
    }

    /// Resolve a free-text address to a latitude/longitude pair.
    ///
    /// `Ok(None)` means the service answered but had no match (or rejected
    /// the query via its status code); that is a normal outcome and callers
    /// must handle it. `Err` carries the cause of a transport or parse
    /// failure, which callers in the suggestion flow flatten to `None`.
    pub async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Degraded> {
        let url = format!("{}/geocode/v1/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Degraded::Upstream(format!(
                "OpenCage returned status {}",
                status
            )));
        }

        let parsed: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| Degraded::Malformed(format!("OpenCage response body: {}", err)))?;

        if let Some(geocode_status) = &parsed.status {
            if geocode_status.code != 200 {
                println!(
                    "OpenCage rejected geocode for '{}' with code {}",
                    address, geocode_status.code
                );
                return Ok(None);
            }
        }

        match parsed.results.first() {
            Some(result) => Ok(Some((result.geometry.lat, result.geometry.lng))),
            None => {
                println!("No coordinates found by OpenCage for address: {}", address);
                Ok(None)
            }
        }
    }
}

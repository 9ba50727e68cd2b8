use serde::{Deserialize, Serialize};

/// A geo-tagged Wikipedia article near a coordinate pair.
///
/// `address` is always empty; the field exists because the frontend renders
/// nearby results and suggested places through the same component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
    pub wiki: String,
}

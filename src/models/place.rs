use serde::{Deserialize, Serialize};

/// A fully resolved tourist attraction as returned to the frontend.
///
/// `image` is always a plain URL string by the time a `Place` exists; the
/// raw tool-call form never leaves the suggestion flow. Coordinates are
/// `None` when geocoding could not resolve the address, which the frontend
/// treats as a normal case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub title: String,
    pub summary: String,
    pub main_attraction: String,
    pub best_time_to_visit: String,
    pub visiting_hours: String,
    pub address: String,
    pub image: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One suggestion exactly as the model emits it, before image resolution
/// and geocoding. Missing string fields default to "N/A" so a single sloppy
/// record does not sink the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(default = "not_available")]
    pub summary: String,
    #[serde(default = "not_available")]
    pub main_attraction: String,
    #[serde(default = "not_available")]
    pub best_time_to_visit: String,
    #[serde(default = "not_available")]
    pub visiting_hours: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image: Option<PlaceImage>,
}

fn not_available() -> String {
    "N/A".to_string()
}

/// The model's "image" field, decoded once at ingestion.
///
/// The prompt asks for a simulated tool call
/// `{ "call": { "function": ..., "args": { "query": ... } } }`, but the
/// model occasionally returns a bare URL string or something else entirely;
/// all three shapes are representable so dispatch happens on the variant,
/// not on repeated string inspection.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlaceImage {
    ToolCall { call: ToolCallSpec },
    Url(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallSpec {
    pub function: ImageSearchFn,
    #[serde(default)]
    pub args: ToolCallArgs,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolCallArgs {
    #[serde(default)]
    pub query: Option<String>,
}

/// The two image-search functions the prompt declares, plus a catch-all for
/// anything the model invents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ImageSearchFn {
    #[serde(rename = "search_pixabay_image")]
    SearchPixabayImage,
    #[serde(rename = "search_unsplash_image")]
    SearchUnsplashImage,
    #[serde(other)]
    Unknown,
}

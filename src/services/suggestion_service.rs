use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::errors::Degraded;
use crate::models::place::{Place, RawPlace};
use crate::services::geocoding_service::GeocodingService;
use crate::services::gemini_service::GeminiService;
use crate::services::image_search_service::ImageSearchService;

/// Generates tourist-place suggestions for a location and enriches each one
/// with a resolved image URL and coordinates.
#[derive(Clone)]
pub struct SuggestionService {
    gemini: GeminiService,
    images: ImageSearchService,
    geocoding: GeocodingService,
}

impl SuggestionService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            gemini: GeminiService::new(config)?,
            images: ImageSearchService::new(config)?,
            geocoding: GeocodingService::new(config)?,
        })
    }

    /// Suggest 6 attractions for the location.
    ///
    /// Upstream and parse failures surface as `Degraded` so the cause stays
    /// observable; the route handler maps any `Err` to an empty list.
    pub async fn suggest(&self, location: &str) -> Result<Vec<Place>, Degraded> {
        let prompt = suggestion_prompt(location);
        let raw = self
            .gemini
            .generate(&prompt, Some(tool_definitions()))
            .await?;

        let raw_places = parse_places(&raw)?;

        let mut places = Vec::with_capacity(raw_places.len());
        for raw_place in raw_places {
            let image = self.images.resolve(raw_place.image, &raw_place.title).await;

            let coordinates = if raw_place.address.is_empty() {
                println!(
                    "No address provided for '{}', cannot geocode.",
                    raw_place.title
                );
                None
            } else {
                self.geocoding
                    .resolve(&raw_place.address)
                    .await
                    .unwrap_or_else(|err| {
                        eprintln!(
                            "Geocoding degraded for '{}': {}",
                            raw_place.address, err
                        );
                        None
                    })
            };

            places.push(Place {
                title: raw_place.title,
                summary: raw_place.summary,
                main_attraction: raw_place.main_attraction,
                best_time_to_visit: raw_place.best_time_to_visit,
                visiting_hours: raw_place.visiting_hours,
                address: raw_place.address,
                image,
                latitude: coordinates.map(|(lat, _)| lat),
                longitude: coordinates.map(|(_, lng)| lng),
            });
        }

        Ok(places)
    }
}

/// Strip an optional Markdown code fence from a model response.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

fn parse_places(raw: &str) -> Result<Vec<RawPlace>, Degraded> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned)
        .map_err(|err| Degraded::Malformed(format!("suggestion payload: {}", err)))
}

/// Function declarations sent with the request. Pixabay is declared first
/// as the primary image source.
fn tool_definitions() -> Value {
    json!({
        "function_declarations": [
            {
                "name": "search_pixabay_image",
                "description": "Searches Pixabay for a high-quality, general scenic or public domain image and returns its direct URL. This is the primary tool for finding images for tourist attractions and scenic spots.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The general term to search for on Pixabay (e.g., 'city park', 'mountain view', 'local market')."
                        }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "search_unsplash_image",
                "description": "Searches Unsplash for a high-quality, general scenic or public domain image and returns its direct URL.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The general term to search for on Unsplash (e.g., 'city park', 'mountain view', 'local market')."
                        }
                    },
                    "required": ["query"]
                }
            }
        ]
    })
}

fn suggestion_prompt(location: &str) -> String {
    format!(
        r#"
Suggest 6 top and most famous **historical and scenic tourist attractions** in {location}.
Prioritize places that are well-known landmarks, historically significant, or offer unique natural beauty.

For each of the 6 suggested places, provide the following details in a comprehensive and engaging manner:
- title
- summary (what it is, a concise description)
- main_attraction (why it's famous, its main attraction, historical significance, or unique specialty)
- best_time_to_visit (e.g., month range, time of day)
- visiting_hours (e.g., daily schedule, closed days)
- address (as precise as possible, including street, city, state, country)
- **image**: For this field, you MUST use one of the available tools to get a relevant image URL.
  - **Always prioritize `search_pixabay_image` for finding high-quality images for all types of tourist places (historical landmarks, scenic spots, etc.).** The query should be a descriptive phrase (e.g., "Shaniwar Wada Pune", "Parvati Hill Pune", "Elephanta Caves").
  - **Only if `search_pixabay_image` is unlikely to find a good relevant image, then use `search_unsplash_image`.** The query should be a descriptive phrase.

  The value for 'image' should be a JSON object representing the tool call, like this:
  {{ "call": {{ "function": "TOOL_NAME", "args": {{ "query": "Your Query" }} }} }}

Return the result as a valid JSON array of dictionaries. Ensure all keys are present, and values are strings. If a specific piece of information is genuinely unknown or not applicable, use "N/A" for its value.

Example of expected JSON format with tool calls:
[
  {{
    "title": "Gateway of India",
    "summary": "An iconic arch monument built in the 20th century in Mumbai, India, symbolizing the city's historical gateway.",
    "main_attraction": "Its grand Indo-Saracenic architecture, historical significance as a former entry point to India, and its prime location offering views of the Arabian Sea and Elephanta Caves ferries.",
    "best_time_to_visit": "November to March for pleasant weather; early mornings or late afternoons to avoid crowds and enjoy the light.",
    "visiting_hours": "Open 24 hours (monument exterior); ferry services typically 7:00 AM - 5:30 PM.",
    "address": "Apollo Bunder, Colaba, Mumbai, Maharashtra 400001, India",
    "image": {{ "call": {{ "function": "search_pixabay_image", "args": {{ "query": "Gateway of India Mumbai" }} }} }}
  }},
  {{
    "title": "Marine Drive",
    "summary": "A 3.6-kilometer long C-shaped boulevard along the Arabian Sea, often called the 'Queen's Necklace' due to its streetlights at night.",
    "main_attraction": "Its stunning panoramic sea views, especially at sunset, the vibrant atmosphere with locals and tourists, and its iconic 'Queen's Necklace' illumination.",
    "best_time_to_visit": "Evening for sunset views and cooler breeze; during high tide for dramatic waves.",
    "visiting_hours": "Open 24 hours.",
    "address": "Netaji Subhash Chandra Bose Road, Mumbai, Maharashtra, India",
    "image": {{ "call": {{ "function": "search_pixabay_image", "args": {{ "query": "Marine Drive Mumbai" }} }} }}
  }}
]
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::{ImageSearchFn, PlaceImage};

    const SIX_PLACES: &str = r#"[
        {"title": "P1", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a1", "image": { "call": { "function": "search_pixabay_image", "args": { "query": "q1" } } }},
        {"title": "P2", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a2", "image": { "call": { "function": "search_pixabay_image", "args": { "query": "q2" } } }},
        {"title": "P3", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a3", "image": { "call": { "function": "search_unsplash_image", "args": { "query": "q3" } } }},
        {"title": "P4", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a4", "image": { "call": { "function": "search_pixabay_image", "args": { "query": "q4" } } }},
        {"title": "P5", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a5", "image": { "call": { "function": "search_pixabay_image", "args": { "query": "q5" } } }},
        {"title": "P6", "summary": "s", "main_attraction": "m", "best_time_to_visit": "b", "visiting_hours": "v", "address": "a6", "image": { "call": { "function": "search_pixabay_image", "args": { "query": "q6" } } }}
    ]"#;

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n[1, 2]\n```";
        assert_eq!(strip_code_fences(fenced), "[1, 2]");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_is_untouched() {
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
    }

    #[test]
    fn parses_a_well_formed_batch_of_six() {
        let fenced = format!("```json\n{}\n```", SIX_PLACES);
        let places = parse_places(&fenced).unwrap();
        assert_eq!(places.len(), 6);

        match &places[2].image {
            Some(PlaceImage::ToolCall { call }) => {
                assert_eq!(call.function, ImageSearchFn::SearchUnsplashImage);
                assert_eq!(call.args.query.as_deref(), Some("q3"));
            }
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_places("not json at all").unwrap_err();
        assert!(matches!(err, Degraded::Malformed(_)));
    }

    #[test]
    fn prompt_mentions_location_and_both_tools() {
        let prompt = suggestion_prompt("Mumbai");
        assert!(prompt.contains("in Mumbai"));
        assert!(prompt.contains("search_pixabay_image"));
        assert!(prompt.contains("search_unsplash_image"));
        assert!(prompt.contains("Suggest 6 top"));
    }

    #[test]
    fn tool_definitions_declare_pixabay_first() {
        let tools = tool_definitions();
        let declarations = tools["function_declarations"].as_array().unwrap();
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0]["name"], "search_pixabay_image");
        assert_eq!(declarations[1]["name"], "search_unsplash_image");
    }
}

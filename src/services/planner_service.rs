use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::Degraded;
use crate::models::itinerary::{ItineraryActivity, SelectedPlace};
use crate::services::gemini_service::GeminiService;
use crate::services::suggestion_service::strip_code_fences;

const TRAVEL_OPTIONS_KEY: &str = "travelOptions";

/// Turns a set of selected places plus a start location into an ordered day
/// itinerary.
#[derive(Clone)]
pub struct PlannerService {
    gemini: GeminiService,
}

impl PlannerService {
    pub fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            gemini: GeminiService::new(config)?,
        })
    }

    pub async fn plan(
        &self,
        places: &[SelectedPlace],
        start_location: &str,
    ) -> Result<Vec<ItineraryActivity>, Degraded> {
        let prompt = planner_prompt(places, start_location);
        let raw = self.gemini.generate(&prompt, None).await?;
        parse_itinerary(&raw)
    }
}

/// Normalize the model's itinerary payload to a bare activity list.
///
/// The canonical shape is `{"travelOptions": [...]}`, but a bare array is
/// accepted too; anything else is malformed.
fn parse_itinerary(raw: &str) -> Result<Vec<ItineraryActivity>, Degraded> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| Degraded::Malformed(format!("itinerary payload: {}", err)))?;

    let activities = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut map) => match map.remove(TRAVEL_OPTIONS_KEY) {
            Some(inner @ Value::Array(_)) => inner,
            Some(_) => {
                return Err(Degraded::Malformed(format!(
                    "'{}' is not an array",
                    TRAVEL_OPTIONS_KEY
                )))
            }
            None => {
                return Err(Degraded::Malformed(format!(
                    "itinerary object is missing '{}'",
                    TRAVEL_OPTIONS_KEY
                )))
            }
        },
        _ => {
            return Err(Degraded::Malformed(
                "itinerary payload is neither an array nor an object".to_string(),
            ))
        }
    };

    serde_json::from_value(activities)
        .map_err(|err| Degraded::Malformed(format!("itinerary activities: {}", err)))
}

fn format_place_block(index: usize, place: &SelectedPlace) -> String {
    let fallback_title = format!("Place {}", index + 1);
    let title = place.title.as_deref().unwrap_or(&fallback_title);
    let address = place.address.as_deref().unwrap_or("N/A");
    let latitude = place
        .latitude
        .map(|lat| lat.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let longitude = place
        .longitude
        .map(|lng| lng.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let summary = place.summary.as_deref().unwrap_or("No summary available.");
    let main_attraction = place.main_attraction.as_deref().unwrap_or("N/A");
    let best_time_to_visit = place.best_time_to_visit.as_deref().unwrap_or("N/A");
    let visiting_hours = place.visiting_hours.as_deref().unwrap_or("N/A");

    format!(
        "  - Title: {}\n    Address: {}\n    Coordinates: ({}, {})\n    Summary: {}\n    Main Attraction: {}\n    Best Time to Visit: {}\n    Visiting Hours: {}",
        title, address, latitude, longitude, summary, main_attraction, best_time_to_visit, visiting_hours
    )
}

fn planner_prompt(places: &[SelectedPlace], start_location: &str) -> String {
    let places_list = places
        .iter()
        .enumerate()
        .map(|(index, place)| format_place_block(index, place))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
You are an expert travel planner. Your task is to create a detailed daily itinerary for a user who wants to visit a list of tourist attractions, starting from a specific location.

**User's Starting Location for the day:** {start_location}

**Selected Tourist Attractions:**
{places_list}

**Instructions:**
1. **Optimize the Route:** Arrange all places, starting from the user's '{start_location}', in a logical order to minimize travel time.
2. **Detailed Plan:** Assume the day starts at 9:00 AM. For each segment of the journey, including visits and travel, suggest a time slot, activity, location, details, and the type of activity.
3. **Meal Breaks:** Incorporate a lunch break (approx. 1 hour) around midday.
4. **Output Format:** Provide the plan as a single JSON object. The object must have one key, `travelOptions`, which contains a detailed daily itinerary as a JSON array. Each element in this array must be an object with the following keys: `time_slot`, `activity`, `location`, `details`, and `type`.
5. **No Extra Text:** Only output the JSON object. Do not include any conversational text or markdown code block delimiters (like ```json).

**Desired JSON Format (Example):**
{{
  "travelOptions": [
    {{
      "time_slot": "9:00 AM - 9:30 AM",
      "activity": "Travel from User's Starting Location to Gateway of India",
      "location": "{start_location} to Gateway of India",
      "details": "Estimated travel time: 30 minutes by taxi/ride-share.",
      "type": "travel"
    }},
    {{
      "time_slot": "9:30 AM - 11:00 AM",
      "activity": "Visit Gateway of India",
      "location": "Gateway of India, Mumbai",
      "details": "Explore the iconic monument and nearby area. Allow time for crowds.",
      "type": "attraction"
    }},
    {{
      "time_slot": "1:00 PM - 2:00 PM",
      "activity": "Lunch Break",
      "location": "Leopold Cafe or nearby restaurant in Colaba",
      "details": "Savor local and international cuisine.",
      "type": "meal"
    }}
  ]
}}
"#
    )
}

use serde::{Deserialize, Serialize};

/// One time-boxed entry in a generated day plan. Order is chronological and
/// significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryActivity {
    pub time_slot: String,
    pub activity: String,
    pub location: String,
    pub details: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A place as the frontend sends it back for planning.
///
/// Every field is optional: the planner renders whatever it has and fills
/// the gaps with "N/A" rather than rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedPlace {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub main_attraction: Option<String>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub visiting_hours: Option<String>,
}

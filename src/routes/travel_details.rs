use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::itinerary::{ItineraryActivity, SelectedPlace};
use crate::services::planner_service::PlannerService;

#[derive(Deserialize)]
pub struct TravelDetailsRequest {
    #[serde(rename = "selectedPlaces", default)]
    pub selected_places: Vec<SelectedPlace>,
    #[serde(rename = "startLocation")]
    pub start_location: String,
    // Accepted for forward-compatibility; route ordering is delegated to
    // the model via the prompt.
    #[serde(rename = "optimizationPreference", default)]
    pub optimization_preference: Option<String>,
}

#[derive(Serialize)]
pub struct TravelDetailsResponse {
    #[serde(rename = "travelOptions")]
    pub travel_options: Vec<ItineraryActivity>,
}

#[derive(Serialize)]
pub struct TravelDetailsError {
    pub error: String,
}

/*
    /api/get-travel-details
*/
pub async fn get_travel_details(
    data: web::Data<PlannerService>,
    input: web::Json<TravelDetailsRequest>,
) -> impl Responder {
    let request = input.into_inner();
    if let Some(preference) = &request.optimization_preference {
        println!("Optimization preference: {}", preference);
    }

    match data
        .plan(&request.selected_places, &request.start_location)
        .await
    {
        Ok(travel_options) => HttpResponse::Ok().json(TravelDetailsResponse { travel_options }),
        Err(err) => {
            eprintln!("Itinerary generation degraded: {}", err);
            // The frontend distinguishes success from failure by payload
            // shape, not status code.
            HttpResponse::Ok().json(TravelDetailsError {
                error: format!("Failed to generate travel plan: {}", err),
            })
        }
    }
}

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::nearby::NearbyPlace;
use crate::services::wikipedia_service::{
    WikipediaService, DEFAULT_RADIUS_METERS, DEFAULT_RESULT_LIMIT,
};

#[derive(Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct NearbyResponse {
    pub places: Vec<NearbyPlace>,
}

/*
    /api/nearby
*/
pub async fn get_nearby(
    data: web::Data<WikipediaService>,
    params: web::Query<NearbyQuery>,
) -> impl Responder {
    let places = data
        .nearby(
            params.lat,
            params.lng,
            params.radius.unwrap_or(DEFAULT_RADIUS_METERS),
            params.limit.unwrap_or(DEFAULT_RESULT_LIMIT),
        )
        .await;

    HttpResponse::Ok().json(NearbyResponse { places })
}

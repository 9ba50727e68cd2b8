use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::place::Place;
use crate::services::suggestion_service::SuggestionService;

#[derive(Deserialize)]
pub struct SuggestRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub places: Vec<Place>,
}

/*
    /api/suggest
*/
pub async fn suggest(
    data: web::Data<SuggestionService>,
    input: web::Json<SuggestRequest>,
) -> impl Responder {
    let address = input.into_inner().address;
    println!("Received address: {}", address);

    let places = match data.suggest(&address).await {
        Ok(places) => places,
        Err(err) => {
            eprintln!("Suggestion flow degraded: {}", err);
            Vec::new()
        }
    };

    HttpResponse::Ok().json(SuggestResponse { places })
}

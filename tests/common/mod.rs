use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};

use travel_companion_api::config::AppConfig;
use travel_companion_api::routes;
use travel_companion_api::services::planner_service::PlannerService;
use travel_companion_api::services::suggestion_service::SuggestionService;
use travel_companion_api::services::wikipedia_service::WikipediaService;

/// A configuration whose upstream endpoints all point at an unroutable
/// loopback port, so every outbound call fails fast without touching the
/// network. Lets the degradation paths run end to end through the real
/// handlers.
pub fn offline_config() -> AppConfig {
    let unreachable = "http://127.0.0.1:1".to_string();

    AppConfig {
        gemini_api_key: "test-gemini-key".to_string(),
        gemini_model: "gemini-1.5-flash".to_string(),
        gemini_base_url: unreachable.clone(),
        opencage_api_key: "test-opencage-key".to_string(),
        opencage_base_url: unreachable.clone(),
        pixabay_api_key: Some("test-pixabay-key".to_string()),
        pixabay_base_url: unreachable.clone(),
        unsplash_access_key: Some("test-unsplash-key".to_string()),
        unsplash_base_url: unreachable.clone(),
        wikipedia_base_url: unreachable,
    }
}

pub fn create_app(
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let suggestions =
        SuggestionService::new(config).expect("Failed to build suggestion service");
    let planner = PlannerService::new(config).expect("Failed to build planner service");
    let nearby = WikipediaService::new(config).expect("Failed to build Wikipedia service");

    App::new()
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        )
        .wrap(Logger::default())
        .route("/health", web::get().to(|| async { "OK" }))
        .app_data(web::Data::new(suggestions))
        .app_data(web::Data::new(planner))
        .app_data(web::Data::new(nearby))
        .service(
            web::scope("/api")
                .route("/suggest", web::post().to(routes::suggest::suggest))
                .route(
                    "/get-travel-details",
                    web::post().to(routes::travel_details::get_travel_details),
                )
                .route("/nearby", web::get().to(routes::nearby::get_nearby)),
        )
}

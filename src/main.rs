use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travel_companion_api::config::AppConfig;
use travel_companion_api::routes;
use travel_companion_api::services::planner_service::PlannerService;
use travel_companion_api::services::suggestion_service::SuggestionService;
use travel_companion_api::services::wikipedia_service::WikipediaService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8086;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let config = AppConfig::from_env().expect("Invalid configuration");

    let suggestions =
        SuggestionService::new(&config).expect("Failed to build suggestion service");
    let planner = PlannerService::new(&config).expect("Failed to build planner service");
    let nearby = WikipediaService::new(&config).expect("Failed to build Wikipedia service");

    println!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
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
            .app_data(web::Data::new(suggestions.clone()))
            .app_data(web::Data::new(planner.clone()))
            .app_data(web::Data::new(nearby.clone()))
            .service(
                web::scope("/api")
                    .route("/suggest", web::post().to(routes::suggest::suggest))
                    .route(
                        "/get-travel-details",
                        web::post().to(routes::travel_details::get_travel_details),
                    )
                    .route("/nearby", web::get().to(routes::nearby::get_nearby)),
            )
    })
    .bind((host, port))?
    .run()
    .await
}

pub mod gemini_service;
pub mod geocoding_service;
pub mod image_search_service;
pub mod planner_service;
pub mod suggestion_service;
pub mod wikipedia_service;

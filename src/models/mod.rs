pub mod itinerary;
pub mod nearby;
pub mod place;

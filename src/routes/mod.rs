pub mod nearby;
pub mod suggest;
pub mod travel_details;

pub mod coordinate;
pub mod marker;
pub mod restaurant_info;
pub mod search_result;
pub mod session;
pub mod travel_mode;

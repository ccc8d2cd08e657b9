pub mod nearby_restaurants;

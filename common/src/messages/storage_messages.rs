use crate::errors::StoreError;
use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::{NewRestaurant, RestaurantRecord};
use crate::types::search_result::SearchResult;
use actix::Message;
use serde::{Deserialize, Serialize};

/////////////////////////////////////////////////////////////////////
// Mensajes hacia el record store
/////////////////////////////////////////////////////////////////////

/// Message to insert a new restaurant.
///
/// ## Purpose
/// Single atomic write. On failure the store is left unchanged.
///
/// ## Contents
/// - `restaurant`: The [`NewRestaurant`] row, without id or timestamp.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<RestaurantRecord, StoreError>")]
pub struct InsertRestaurant {
    pub restaurant: NewRestaurant,
}

/// Message to read the full restaurants table.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<Vec<RestaurantRecord>, StoreError>")]
pub struct SelectAllRestaurants;

/// Message to run the store's spatial function.
///
/// ## Purpose
/// Returns only the restaurants within `radius_km` of (`lat`, `lon`), each with
/// its `distance_km`, ordered by ascending distance.
///
/// ## Contents
/// - `lat`, `lon`: Query center in degrees.
/// - `radius_km`: Search radius in kilometers.
#[derive(Message, Debug, Clone, Copy, Serialize, Deserialize)]
#[rtype(result = "Result<Vec<SearchResult>, StoreError>")]
pub struct FindNearbyRestaurants {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

impl FindNearbyRestaurants {
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        Self {
            lat: center.latitude(),
            lon: center.longitude(),
            radius_km,
        }
    }
}

/// Message to switch the reference store on or off, to simulate outages.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct SetAvailability {
    pub online: bool,
}

use crate::constants::EARTH_RADIUS_KM;
use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::RestaurantRecord;
use crate::types::search_result::SearchResult;
use crate::types::travel_mode::TravelMode;
use std::cmp::Ordering;

/// Great-circle distance between two coordinates in kilometers (haversine).
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`, distance is
/// `R · 2·asin(√a)` with R = 6371 km. Symmetric and zero for equal points.
pub fn calculate_distance(point1: Coordinate, point2: Coordinate) -> f64 {
    let lat1 = point1.latitude().to_radians();
    let lat2 = point2.latitude().to_radians();
    let delta_lat = (point2.latitude() - point1.latitude()).to_radians();
    let delta_lon = (point2.longitude() - point1.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // a puede pasarse de 1 por redondeo en puntos antipodales
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Keeps the restaurants whose distance to `center` is at most `radius_km`
/// (boundary included), annotated with that distance and sorted nearest
/// first. Ties keep a stable order by id.
pub fn restaurants_within(
    restaurants: Vec<RestaurantRecord>,
    center: Coordinate,
    radius_km: f64,
) -> Vec<SearchResult> {
    let mut nearby: Vec<SearchResult> = restaurants
        .into_iter()
        .filter_map(|restaurant| {
            let distance_km = calculate_distance(center, restaurant.position);
            (distance_km <= radius_km).then_some(SearchResult {
                restaurant,
                distance_km,
            })
        })
        .collect();
    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.restaurant.id.cmp(&b.restaurant.id))
    });
    nearby
}

/// Straight-line travel time in minutes at the nominal speed of `mode`.
pub fn estimate_travel_minutes(distance_km: f64, mode: TravelMode) -> f64 {
    distance_km / mode.speed_kmh() * 60.0
}

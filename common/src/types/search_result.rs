use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::RestaurantRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy used to produce a radius search result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Ask the store's spatial function; the store filters and orders.
    #[default]
    Remote,
    /// Fetch the full snapshot and filter it locally.
    Local,
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(SearchMode::Remote),
            "local" => Ok(SearchMode::Local),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Remote => write!(f, "remote"),
            SearchMode::Local => write!(f, "local"),
        }
    }
}

/// A restaurant returned by a radius search, with its distance to the query center.
/// Recomputed on every search and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub restaurant: RestaurantRecord,
    pub distance_km: f64,
}

/// An entry of the active result set shown by the map and the list view.
///
/// Entries coming from the full table carry no distance, entries from a
/// radius search do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub restaurant: RestaurantRecord,
    pub distance_km: Option<f64>,
}

impl Listing {
    pub fn id(&self) -> &str {
        &self.restaurant.id
    }
}

impl From<RestaurantRecord> for Listing {
    fn from(restaurant: RestaurantRecord) -> Self {
        Listing {
            restaurant,
            distance_km: None,
        }
    }
}

impl From<SearchResult> for Listing {
    fn from(result: SearchResult) -> Self {
        Listing {
            restaurant: result.restaurant,
            distance_km: Some(result.distance_km),
        }
    }
}

/// Anything that can be drawn as a restaurant marker.
pub trait MapFeature {
    fn feature_id(&self) -> &str;
    fn position(&self) -> Coordinate;
}

impl MapFeature for RestaurantRecord {
    fn feature_id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> Coordinate {
        self.position
    }
}

impl MapFeature for SearchResult {
    fn feature_id(&self) -> &str {
        &self.restaurant.id
    }

    fn position(&self) -> Coordinate {
        self.restaurant.position
    }
}

impl MapFeature for Listing {
    fn feature_id(&self) -> &str {
        &self.restaurant.id
    }

    fn position(&self) -> Coordinate {
        self.restaurant.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_row_is_flat() {
        let row = r#"{
            "id": "r-1",
            "name": "El Cuartito",
            "description": null,
            "address": "Talcahuano 937",
            "position": {"latitude": -34.5986, "longitude": -58.3853},
            "owner_id": "owner-1",
            "phone": null,
            "cuisine_type": "Pizza",
            "opening_hours": "12-24",
            "rating": 4,
            "created_at": "2024-05-01T12:00:00Z",
            "distance_km": 1.25
        }"#;
        let result: SearchResult = serde_json::from_str(row).unwrap();
        assert_eq!(result.restaurant.id, "r-1");
        assert_eq!(result.distance_km, 1.25);
        assert_eq!(result.feature_id(), "r-1");

        let listing = Listing::from(result);
        assert_eq!(listing.distance_km, Some(1.25));
        assert_eq!(listing.id(), "r-1");
    }
}

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::errors::ValidationError;
use crate::types::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating between 1 and 5. A missing rating is `Option::None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(stars: u8) -> Result<Self, ValidationError> {
        if (MIN_RATING..=MAX_RATING).contains(&stars) {
            Ok(Rating(stars))
        } else {
            Err(ValidationError::InvalidRating(stars))
        }
    }

    /// Form semantics: 0 means the owner did not rate.
    pub fn from_form(stars: u8) -> Result<Option<Self>, ValidationError> {
        match stars {
            0 => Ok(None),
            n => Rating::new(n).map(Some),
        }
    }

    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_RATING)
    }
}

/// A restaurant listing as stored in the record store.
///
/// `id`, `owner_id` and `created_at` are assigned once on insert and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Stable identifier assigned by the store.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub position: Coordinate,
    /// Identity of the owner that registered the listing.
    pub owner_id: String,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
    pub opening_hours: Option<String>,
    pub rating: Option<Rating>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload: a restaurant record without the store-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub position: Coordinate,
    pub owner_id: String,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
    pub opening_hours: Option<String>,
    pub rating: Option<Rating>,
}

impl NewRestaurant {
    /// Materializes the row once the store has picked an id and timestamp.
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> RestaurantRecord {
        RestaurantRecord {
            id,
            name: self.name,
            description: self.description,
            address: self.address,
            position: self.position,
            owner_id: self.owner_id,
            phone: self.phone,
            cuisine_type: self.cuisine_type,
            opening_hours: self.opening_hours,
            rating: self.rating,
            created_at,
        }
    }
}

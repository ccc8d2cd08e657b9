use crate::constants::{DRIVING_SPEED_KMH, WALKING_SPEED_KMH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user wants to reach the selected restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    #[default]
    Driving,
}

impl TravelMode {
    /// Lowercase token expected by the navigation service.
    pub fn token(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
        }
    }

    pub fn speed_kmh(&self) -> f64 {
        match self {
            TravelMode::Walking => WALKING_SPEED_KMH,
            TravelMode::Driving => DRIVING_SPEED_KMH,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Case-insensitive: `WALKING`, `Walking` and `walking` are the same mode.
impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "walking" | "walk" => Ok(TravelMode::Walking),
            "driving" | "drive" => Ok(TravelMode::Driving),
            other => Err(format!("unknown travel mode '{}'", other)),
        }
    }
}

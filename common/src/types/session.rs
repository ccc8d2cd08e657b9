use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability set the client believes the session has.
///
/// This is client-chosen metadata stored next to the provider session. It is
/// a hint for the UI and never an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    RestaurantOwner,
}

impl UserRole {
    pub fn tag(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::RestaurantOwner => "restaurant_owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(UserRole::User),
            "restaurant_owner" => Ok(UserRole::RestaurantOwner),
            other => Err(format!("unknown role tag '{}'", other)),
        }
    }
}

/// Identity handed out by the identity provider. The id is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
}

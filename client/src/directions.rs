use crate::client_actors::location::request_position;
use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::messages::GetCurrentPosition;
use common::types::coordinate::Coordinate;
use common::types::travel_mode::TravelMode;
use common::utils::{calculate_distance, estimate_travel_minutes};
use serde::Serialize;
use std::time::Duration;

/// Navigation handoff for an external maps service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub destination: Coordinate,
    pub origin: Option<Coordinate>,
    pub mode: TravelMode,
    pub url: String,
    /// Straight-line travel time, only known when there is an origin.
    pub estimated_minutes: Option<f64>,
}

/// Builds a maps directions URL:
/// `<base>?api=1[&origin=lat,lon]&destination=lat,lon&travelmode=<mode>`.
pub fn build_directions_url(
    base_url: &str,
    destination: Coordinate,
    origin: Option<Coordinate>,
    mode: TravelMode,
) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    let mut url = format!("{}{}api=1", base_url, separator);
    if let Some(origin) = origin {
        url.push_str(&format!("&origin={}", origin));
    }
    url.push_str(&format!(
        "&destination={}&travelmode={}",
        destination,
        mode.token()
    ));
    url
}

/// Turns a selected destination into a [`DirectionsRequest`].
///
/// Without a known origin it makes one location lookup first; if that lookup
/// fails the request simply goes out without an origin.
#[derive(Clone)]
pub struct DirectionsLauncher {
    location: Recipient<GetCurrentPosition>,
    base_url: String,
    timeout: Duration,
    logger: Logger,
}

impl DirectionsLauncher {
    pub fn new(location: Recipient<GetCurrentPosition>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            location,
            base_url: base_url.into(),
            timeout,
            logger: Logger::new("Directions", Color::Blue),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn request(&self, destination: Coordinate, origin: Option<Coordinate>, mode: TravelMode) -> DirectionsRequest {
        let estimated_minutes =
            origin.map(|o| estimate_travel_minutes(calculate_distance(o, destination), mode));
        DirectionsRequest {
            destination,
            origin,
            mode,
            url: build_directions_url(&self.base_url, destination, origin, mode),
            estimated_minutes,
        }
    }

    pub async fn launch(&self, destination: Coordinate, origin: Option<Coordinate>, mode: TravelMode) -> DirectionsRequest {
        let origin = match origin {
            Some(origin) => Some(origin),
            None => match request_position(&self.location, self.timeout).await {
                Ok(position) => Some(position),
                Err(e) => {
                    self.logger.warn(format!(
                        "Error getting location: {}. Opening destination-only directions.",
                        e
                    ));
                    None
                }
            },
        };
        let request = self.request(destination, origin, mode);
        self.logger.info(format!("Directions: {}", request.url));
        request
    }
}

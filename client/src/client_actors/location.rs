use actix::prelude::*;
use colored::Color;
use common::config::Config;
use common::constants::{
    LOCATION_JITTER_DEGREES, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
};
use common::errors::LocationError;
use common::logger::Logger;
use common::messages::GetCurrentPosition;
use common::types::coordinate::Coordinate;
use rand::Rng;
use std::time::Duration;

/// Actor LocationService: simulated device positioning.
///
/// ## Responsibilities
/// - Answers one-shot [`GetCurrentPosition`] lookups with a configured reading
///   or a configured failure.
/// - Optionally delays each answer and adds a small random offset, like a
///   real receiver would.
pub struct LocationService {
    reading: Result<Coordinate, LocationError>,
    delay: Duration,
    jitter_degrees: f64,
    logger: Logger,
}

impl LocationService {
    pub fn fixed(position: Coordinate) -> Self {
        Self::with_reading(Ok(position))
    }

    pub fn failing(error: LocationError) -> Self {
        Self::with_reading(Err(error))
    }

    /// Reads `MAP_SELF_LOCATION`; without it the device has no positioning.
    pub fn from_config(config: &Config) -> Self {
        match config.self_location {
            Some(position) => Self::fixed(position).with_jitter(LOCATION_JITTER_DEGREES),
            None => Self::failing(LocationError::Unsupported),
        }
    }

    fn with_reading(reading: Result<Coordinate, LocationError>) -> Self {
        Self {
            reading,
            delay: Duration::ZERO,
            jitter_degrees: 0.0,
            logger: Logger::new("Location", Color::Cyan),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_jitter(mut self, degrees: f64) -> Self {
        self.jitter_degrees = degrees.abs();
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn read(&self) -> Result<Coordinate, LocationError> {
        let position = self.reading?;
        if self.jitter_degrees == 0.0 {
            return Ok(position);
        }
        let mut rng = rand::thread_rng();
        let latitude = (position.latitude()
            + rng.gen_range(-self.jitter_degrees..=self.jitter_degrees))
        .clamp(MIN_LATITUDE, MAX_LATITUDE);
        let longitude = (position.longitude()
            + rng.gen_range(-self.jitter_degrees..=self.jitter_degrees))
        .clamp(MIN_LONGITUDE, MAX_LONGITUDE);
        Ok(Coordinate::new(latitude, longitude).unwrap_or(position))
    }
}

impl Actor for LocationService {
    type Context = Context<Self>;
}

impl Handler<GetCurrentPosition> for LocationService {
    type Result = ResponseFuture<Result<Coordinate, LocationError>>;

    fn handle(&mut self, _msg: GetCurrentPosition, _ctx: &mut Self::Context) -> Self::Result {
        // la lectura se toma antes de esperar
        let reading = self.read();
        match &reading {
            Ok(position) => self.logger.debug(format!("Position fix at {}", position)),
            Err(e) => self.logger.warn(format!("Position lookup failed: {}", e)),
        }
        let delay = self.delay;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reading
        })
    }
}

/// One-shot lookup bounded by `timeout`.
///
/// A lookup that does not answer in time is a [`LocationError::Timeout`]; a
/// location service that is gone counts as unsupported.
pub async fn request_position(
    location: &Recipient<GetCurrentPosition>,
    timeout: Duration,
) -> Result<Coordinate, LocationError> {
    match tokio::time::timeout(timeout, location.send(GetCurrentPosition)).await {
        Ok(Ok(reading)) => reading,
        Ok(Err(_mailbox)) => Err(LocationError::Unsupported),
        Err(_elapsed) => Err(LocationError::Timeout),
    }
}

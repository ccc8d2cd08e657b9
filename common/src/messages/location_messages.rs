use crate::errors::LocationError;
use crate::types::coordinate::Coordinate;
use actix::Message;

/// One-shot request for the device's current position.
///
/// May prompt for consent out of band; the answer is either a position or the
/// reason the position is unavailable.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<Coordinate, LocationError>")]
pub struct GetCurrentPosition;

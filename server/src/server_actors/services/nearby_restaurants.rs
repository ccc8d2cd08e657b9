use crate::server_actors::storage::Storage;
use actix::prelude::*;
use colored::Color;
use common::errors::StoreError;
use common::logger::Logger;
use common::messages::{FindNearbyRestaurants, SelectAllRestaurants};
use common::types::coordinate::Coordinate;
use common::types::search_result::SearchResult;
use common::utils::restaurants_within;

/// The `NearbyRestaurantsService` actor is the store-side spatial function
/// `find_nearby_restaurants(lat, lon, radius_km)`.
///
/// ## Responsibilities:
/// - Retrieve all restaurants from the storage.
/// - Keep the ones within the requested radius of the query point.
/// - Answer with each restaurant's `distance_km`, nearest first.
pub struct NearbyRestaurantsService {
    /// The address of the Storage actor to fetch restaurants from.
    pub storage_addr: Addr<Storage>,
    /// Logger instance for events
    pub logger: Logger,
}

impl NearbyRestaurantsService {
    /// Creates a new instance of `NearbyRestaurantsService`.
    ///
    /// ## Arguments
    /// * `storage_addr` - The address of the Storage actor.
    pub fn new(storage_addr: Addr<Storage>) -> Self {
        let logger = Logger::new("Nearby Restaurants Service", Color::Green);
        NearbyRestaurantsService {
            storage_addr,
            logger,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Checks the query arguments the same way the database function does.
    fn query_center(msg: &FindNearbyRestaurants) -> Result<Coordinate, StoreError> {
        if !(msg.radius_km > 0.0) {
            return Err(StoreError::Rejected(format!(
                "radius_km must be positive, got {}",
                msg.radius_km
            )));
        }
        Coordinate::new(msg.lat, msg.lon).map_err(|e| StoreError::Rejected(e.to_string()))
    }
}

impl Actor for NearbyRestaurantsService {
    type Context = Context<Self>;
}

impl Handler<FindNearbyRestaurants> for NearbyRestaurantsService {
    type Result = ResponseFuture<Result<Vec<SearchResult>, StoreError>>;

    /// Handles the `FindNearbyRestaurants` message by retrieving all restaurants from storage
    /// and filtering them around the query point.
    fn handle(&mut self, msg: FindNearbyRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        let storage_addr = self.storage_addr.clone();
        let logger = self.logger.clone();

        Box::pin(async move {
            let center = Self::query_center(&msg)?;

            let restaurants = match storage_addr.send(SelectAllRestaurants).await {
                Ok(Ok(restaurants)) => restaurants,
                Ok(Err(e)) => {
                    logger.error(format!("Error retrieving restaurants from storage: {}", e));
                    return Err(e);
                }
                Err(e) => {
                    logger.error(format!("Storage mailbox error: {}", e));
                    return Err(StoreError::Unavailable(e.to_string()));
                }
            };

            logger.debug(format!(
                "Retrieved {} restaurants from storage.",
                restaurants.len()
            ));
            let nearby = restaurants_within(restaurants, center, msg.radius_km);
            if nearby.is_empty() {
                logger.warn(format!(
                    "No restaurants within {} km of {}.",
                    msg.radius_km, center
                ));
            } else {
                logger.info(format!(
                    "Found {} restaurants within {} km of {}",
                    nearby.len(),
                    msg.radius_km,
                    center
                ));
            }
            Ok(nearby)
        })
    }
}

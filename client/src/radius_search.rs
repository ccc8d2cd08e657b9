use actix::prelude::*;
use colored::Color;
use common::errors::{DiscoveryError, StoreError, ValidationError};
use common::logger::Logger;
use common::messages::{FindNearbyRestaurants, SelectAllRestaurants};
use common::types::coordinate::Coordinate;
use common::types::restaurant_info::RestaurantRecord;
use common::types::search_result::{SearchMode, SearchResult};
use common::utils::restaurants_within;

/// A validated radius search: center, radius (> 0 km) and strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    center: Coordinate,
    radius_km: f64,
    mode: SearchMode,
}

impl SearchQuery {
    pub fn new(center: Coordinate, radius_km: f64, mode: SearchMode) -> Result<Self, ValidationError> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ValidationError::InvalidRadius(radius_km));
        }
        Ok(Self {
            center,
            radius_km,
            mode,
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }
}

/// Produces the restaurants within a radius of a point, either through the
/// store's spatial function or by filtering a full snapshot locally.
///
/// Cheap to clone, so it can be moved into the futures the actors spawn.
#[derive(Clone)]
pub struct RadiusSearch {
    nearby: Recipient<FindNearbyRestaurants>,
    snapshot: Recipient<SelectAllRestaurants>,
    logger: Logger,
}

impl RadiusSearch {
    pub fn new(
        nearby: Recipient<FindNearbyRestaurants>,
        snapshot: Recipient<SelectAllRestaurants>,
    ) -> Self {
        Self {
            nearby,
            snapshot,
            logger: Logger::new("Radius Search", Color::Cyan),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Runs `query`.
    ///
    /// Remote mode keeps the store's ordering as is. Local mode fetches the
    /// table once and sorts by ascending distance. A failed store call is a
    /// [`DiscoveryError::SearchFailed`] and is not retried.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<SearchResult>, DiscoveryError> {
        let results = match query.mode {
            SearchMode::Remote => {
                let request = FindNearbyRestaurants::around(query.center, query.radius_km);
                self.nearby
                    .send(request)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))
                    .and_then(|response| response)
                    .map_err(DiscoveryError::SearchFailed)?
            }
            SearchMode::Local => {
                let restaurants = self
                    .select_all()
                    .await
                    .map_err(DiscoveryError::SearchFailed)?;
                restaurants_within(restaurants, query.center, query.radius_km)
            }
        };

        self.logger.info(format!(
            "{} restaurants within {} km of {} ({} search)",
            results.len(),
            query.radius_km,
            query.center,
            query.mode
        ));
        Ok(results)
    }

    /// Full snapshot of the restaurants table.
    pub async fn fetch_all(&self) -> Result<Vec<RestaurantRecord>, DiscoveryError> {
        self.select_all()
            .await
            .map_err(DiscoveryError::StoreUnavailable)
    }

    async fn select_all(&self) -> Result<Vec<RestaurantRecord>, StoreError> {
        let result = match self.snapshot.send(SelectAllRestaurants).await {
            Ok(result) => result,
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        };
        if let Err(e) = &result {
            self.logger.error(format!("Error fetching restaurants: {}", e));
        }
        result
    }
}

use actix::prelude::*;
use chrono::Utc;
use colored::Color;
use common::errors::StoreError;
use common::logger::Logger;
use common::messages::{InsertRestaurant, SelectAllRestaurants, SetAvailability};
use common::types::restaurant_info::{NewRestaurant, RestaurantRecord};
use std::collections::HashMap;
use uuid::Uuid;

/// The `Storage` actor is the in-memory record store for restaurant listings.
///
/// # Responsibilities
/// - Assigns ids and creation timestamps on insert.
/// - Rejects rows that break the table constraints, leaving the table unchanged.
/// - Serves the full table in insertion order.
/// - Can be switched offline to simulate a backend outage.
pub struct Storage {
    /// Dictionary with the restaurants, by id.
    pub restaurants: HashMap<String, RestaurantRecord>,
    /// Ids in insertion order, so full reads are stable.
    pub insertion_order: Vec<String>,
    /// When false every request fails with [`StoreError::Unavailable`].
    pub online: bool,
    /// Logger for storage events.
    pub logger: Logger,
}

impl Storage {
    /// Creates an empty, online `Storage`.
    pub fn new() -> Self {
        Self {
            restaurants: HashMap::new(),
            insertion_order: Vec::new(),
            online: true,
            logger: Logger::new("Storage", Color::White),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online {
            Ok(())
        } else {
            Err(StoreError::Unavailable("storage is offline".to_string()))
        }
    }

    /// Table constraints: NOT NULL text columns must carry text.
    fn check_constraints(restaurant: &NewRestaurant) -> Result<(), StoreError> {
        let required = [
            ("name", &restaurant.name),
            ("address", &restaurant.address),
            ("owner_id", &restaurant.owner_id),
        ];
        for (column, value) in required {
            if value.trim().is_empty() {
                return Err(StoreError::Rejected(format!("{} cannot be empty", column)));
            }
        }
        Ok(())
    }

    fn insert(&mut self, restaurant: NewRestaurant) -> Result<RestaurantRecord, StoreError> {
        self.ensure_online()?;
        Self::check_constraints(&restaurant)?;

        let id = Uuid::new_v4().to_string();
        let record = restaurant.into_record(id.clone(), Utc::now());
        self.restaurants.insert(id.clone(), record.clone());
        self.insertion_order.push(id);
        Ok(record)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for Storage {
    type Context = Context<Self>;
}

/// Handles inserting a new restaurant.
impl Handler<InsertRestaurant> for Storage {
    type Result = Result<RestaurantRecord, StoreError>;

    fn handle(&mut self, msg: InsertRestaurant, _ctx: &mut Self::Context) -> Self::Result {
        match self.insert(msg.restaurant) {
            Ok(record) => {
                self.logger.info(format!(
                    "Restaurant added: {} ({}) at {}",
                    record.name, record.id, record.position
                ));
                Ok(record)
            }
            Err(e) => {
                self.logger.error(format!("Insert refused: {}", e));
                Err(e)
            }
        }
    }
}

/// Handles requests for the full restaurants table.
impl Handler<SelectAllRestaurants> for Storage {
    type Result = Result<Vec<RestaurantRecord>, StoreError>;

    fn handle(&mut self, _msg: SelectAllRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.ensure_online()?;
        let restaurants: Vec<RestaurantRecord> = self
            .insertion_order
            .iter()
            .filter_map(|id| self.restaurants.get(id))
            .cloned()
            .collect();
        self.logger
            .debug(format!("Serving {} restaurants.", restaurants.len()));
        Ok(restaurants)
    }
}

impl Handler<SetAvailability> for Storage {
    type Result = ();

    fn handle(&mut self, msg: SetAvailability, _ctx: &mut Self::Context) -> Self::Result {
        self.online = msg.online;
        if msg.online {
            self.logger.info("Storage back online.");
        } else {
            self.logger.warn("Storage switched offline.");
        }
    }
}

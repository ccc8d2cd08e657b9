//! Fake collaborators shared by the client tests.

use crate::radius_search::RadiusSearch;
use crate::registration::Registrar;
use actix::prelude::*;
use chrono::Utc;
use common::constants::EARTH_RADIUS_KM;
use common::errors::{LocationError, StoreError};
use common::logger::Logger;
use common::messages::{
    FindNearbyRestaurants, GetCurrentPosition, InsertRestaurant, SelectAllRestaurants,
};
use common::types::coordinate::Coordinate;
use common::types::restaurant_info::RestaurantRecord;
use common::types::search_result::SearchResult;
use common::utils::{calculate_distance, restaurants_within};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn center() -> Coordinate {
    Coordinate::new(0.0, 0.0).unwrap()
}

/// Point `km` kilometers north of [`center`].
pub fn km_north(km: f64) -> Coordinate {
    Coordinate::new((km / EARTH_RADIUS_KM).to_degrees(), 0.0).unwrap()
}

pub fn record_at(id: &str, position: Coordinate) -> RestaurantRecord {
    RestaurantRecord {
        id: id.to_string(),
        name: format!("Restaurant {}", id),
        description: Some("Test restaurant".to_string()),
        address: "Calle Falsa 123".to_string(),
        position,
        owner_id: "owner-1".to_string(),
        phone: None,
        cuisine_type: Some("Pizza".to_string()),
        opening_hours: None,
        rating: None,
        created_at: Utc::now(),
    }
}

pub fn record_km_north(id: &str, km: f64) -> RestaurantRecord {
    record_at(id, km_north(km))
}

pub fn result_km_north(id: &str, km: f64) -> SearchResult {
    let restaurant = record_km_north(id, km);
    let distance_km = calculate_distance(center(), restaurant.position);
    SearchResult {
        restaurant,
        distance_km,
    }
}

struct Scripted<T> {
    delay: Duration,
    response: T,
}

impl<T> Scripted<T> {
    async fn answer(self) -> T {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response
    }
}

/// In-test record store. Nearby and snapshot answers can be scripted one by
/// one, with a delay each; when a script runs out the store answers from its
/// own table.
#[derive(Default)]
pub struct FakeStoreState {
    restaurants: Vec<RestaurantRecord>,
    nearby_script: VecDeque<Scripted<Result<Vec<SearchResult>, StoreError>>>,
    snapshot_script: VecDeque<Scripted<Result<Vec<RestaurantRecord>, StoreError>>>,
    snapshot_error: Option<StoreError>,
    insert_error: Option<StoreError>,
    insert_delay: Duration,
    inserted: Vec<RestaurantRecord>,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeStoreState>>,
    nearby_calls: Arc<AtomicUsize>,
    snapshot_calls: Arc<AtomicUsize>,
    insert_calls: Arc<AtomicUsize>,
    addr: Arc<Mutex<Option<Addr<FakeStoreActor>>>>,
}

impl FakeStore {
    pub fn with_restaurants(restaurants: Vec<RestaurantRecord>) -> Self {
        let store = FakeStore::default();
        store.state.lock().unwrap().restaurants = restaurants;
        store
    }

    pub fn script_nearby(self, response: Result<Vec<SearchResult>, StoreError>) -> Self {
        self.script_nearby_after(Duration::ZERO, response)
    }

    pub fn script_nearby_after(
        self,
        delay: Duration,
        response: Result<Vec<SearchResult>, StoreError>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .nearby_script
            .push_back(Scripted { delay, response });
        self
    }

    pub fn script_snapshot_after(
        self,
        delay: Duration,
        response: Result<Vec<RestaurantRecord>, StoreError>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .snapshot_script
            .push_back(Scripted { delay, response });
        self
    }

    pub fn delay_inserts(self, delay: Duration) -> Self {
        self.state.lock().unwrap().insert_delay = delay;
        self
    }

    pub fn fail_snapshot(self, error: StoreError) -> Self {
        self.state.lock().unwrap().snapshot_error = Some(error);
        self
    }

    pub fn fail_inserts(self, error: StoreError) -> Self {
        self.state.lock().unwrap().insert_error = Some(error);
        self
    }

    pub fn set_restaurants(&self, restaurants: Vec<RestaurantRecord>) {
        self.state.lock().unwrap().restaurants = restaurants;
    }

    pub fn distance_to(&self, id: &str) -> f64 {
        let state = self.state.lock().unwrap();
        let record = state.restaurants.iter().find(|r| r.id == id).unwrap();
        calculate_distance(center(), record.position)
    }

    pub fn nearby_calls(&self) -> usize {
        self.nearby_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn inserted(&self) -> Vec<RestaurantRecord> {
        self.state.lock().unwrap().inserted.clone()
    }

    /// Starts the backing actor on first use; must run inside an actix system.
    pub fn addr(&self) -> Addr<FakeStoreActor> {
        let mut addr = self.addr.lock().unwrap();
        addr.get_or_insert_with(|| FakeStoreActor { store: self.clone() }.start())
            .clone()
    }

    pub fn radius_search(&self) -> RadiusSearch {
        let addr = self.addr();
        RadiusSearch::new(addr.clone().recipient(), addr.recipient())
            .with_logger(Logger::quiet("search"))
    }

    pub fn registrar(&self) -> Registrar {
        Registrar::new(self.addr().recipient()).with_logger(Logger::quiet("registrar"))
    }
}

pub struct FakeStoreActor {
    store: FakeStore,
}

impl Actor for FakeStoreActor {
    type Context = Context<Self>;
}

impl Handler<FindNearbyRestaurants> for FakeStoreActor {
    type Result = ResponseFuture<Result<Vec<SearchResult>, StoreError>>;

    fn handle(&mut self, msg: FindNearbyRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.store.nearby_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.store.state.lock().unwrap();
        let scripted = state.nearby_script.pop_front().unwrap_or_else(|| {
            let center = Coordinate::new(msg.lat, msg.lon).unwrap();
            Scripted {
                delay: Duration::ZERO,
                response: Ok(restaurants_within(
                    state.restaurants.clone(),
                    center,
                    msg.radius_km,
                )),
            }
        });
        Box::pin(scripted.answer())
    }
}

impl Handler<SelectAllRestaurants> for FakeStoreActor {
    type Result = ResponseFuture<Result<Vec<RestaurantRecord>, StoreError>>;

    fn handle(&mut self, _msg: SelectAllRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.store.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.store.state.lock().unwrap();
        let scripted = state.snapshot_script.pop_front().unwrap_or_else(|| Scripted {
            delay: Duration::ZERO,
            response: match &state.snapshot_error {
                Some(e) => Err(e.clone()),
                None => Ok(state.restaurants.clone()),
            },
        });
        Box::pin(scripted.answer())
    }
}

impl Handler<InsertRestaurant> for FakeStoreActor {
    type Result = ResponseFuture<Result<RestaurantRecord, StoreError>>;

    fn handle(&mut self, msg: InsertRestaurant, _ctx: &mut Self::Context) -> Self::Result {
        let n = self.store.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.store.state.lock().unwrap();
        let response = match &state.insert_error {
            Some(e) => Err(e.clone()),
            None => {
                let record = msg.restaurant.into_record(format!("new-{}", n), Utc::now());
                state.inserted.push(record.clone());
                state.restaurants.push(record.clone());
                Ok(record)
            }
        };
        Box::pin(
            Scripted {
                delay: state.insert_delay,
                response,
            }
            .answer(),
        )
    }
}

/// Location service answering each lookup from a script, in order, with a
/// delay each. Lookups past the end of the script are unsupported.
pub struct ScriptedLocation {
    script: VecDeque<Scripted<Result<Coordinate, LocationError>>>,
}

impl ScriptedLocation {
    pub fn new(script: Vec<(Duration, Result<Coordinate, LocationError>)>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|(delay, response)| Scripted { delay, response })
                .collect(),
        }
    }
}

impl Actor for ScriptedLocation {
    type Context = Context<Self>;
}

impl Handler<GetCurrentPosition> for ScriptedLocation {
    type Result = ResponseFuture<Result<Coordinate, LocationError>>;

    fn handle(&mut self, _msg: GetCurrentPosition, _ctx: &mut Self::Context) -> Self::Result {
        let scripted = self.script.pop_front().unwrap_or(Scripted {
            delay: Duration::ZERO,
            response: Err(LocationError::Unsupported),
        });
        Box::pin(scripted.answer())
    }
}

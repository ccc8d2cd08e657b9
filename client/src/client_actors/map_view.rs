use crate::client_actors::location::request_position;
use crate::directions::{DirectionsLauncher, DirectionsRequest};
use crate::messages::internal_messages::{
    ActivateListEntry, ClearNearby, GetMapState, LoadRestaurants, LocateUser, MapClicked,
    Navigate, RecenterOnSelf, SetTravelMode, ShowNearby,
};
use crate::radius_search::{RadiusSearch, SearchQuery};
use crate::selection::{SelectionController, ViewAnimation};
use actix::fut;
use actix::prelude::*;
use colored::Color;
use common::config::Config;
use common::constants::{MARKER_HIT_RADIUS_KM, NEARBY_ZOOM, SELF_ZOOM};
use common::errors::DiscoveryError;
use common::logger::Logger;
use common::messages::GetCurrentPosition;
use common::reconciler::MarkerReconciler;
use common::types::coordinate::Coordinate;
use common::types::marker::{MarkerSet, MarkerTag};
use common::types::restaurant_info::RestaurantRecord;
use common::types::search_result::{Listing, SearchMode, SearchResult};
use common::types::travel_mode::TravelMode;
use common::utils::calculate_distance;
use serde::Serialize;
use std::time::Duration;

/// What happened to an asynchronous request once its answer arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestOutcome {
    /// The answer replaced the map state; `count` records were received.
    Applied { count: usize },
    /// A newer request of the same kind was issued before the answer arrived.
    Discarded,
    /// The request was not sent (no self location to search around).
    Skipped,
}

/// Circle drawn while the nearby results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusOverlay {
    pub center: Coordinate,
    pub radius_km: f64,
}

#[derive(Debug, Clone)]
struct NearbyResults {
    results: Vec<SearchResult>,
    overlay: RadiusOverlay,
}

/// Read-only copy of everything the map screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct MapSnapshot {
    /// The active result set, in display order.
    pub listings: Vec<Listing>,
    pub markers: MarkerSet,
    pub selected: Option<Listing>,
    pub self_location: Option<Coordinate>,
    pub overlay: Option<RadiusOverlay>,
    pub camera: Option<ViewAnimation>,
    pub clicked: Option<Coordinate>,
    pub travel_mode: TravelMode,
}

/// Actor MapView: the restaurant map screen.
///
/// ## Responsibilities
/// - Keeps the full restaurants set and, while toggled on, the nearby set.
///   Exactly one of them is the active set shown in the list and on the map.
/// - Redraws markers through [`MarkerReconciler`] after every change and keeps
///   the selection consistent with the active set.
/// - Stamps every store and location request with a sequence number per kind
///   and drops answers that arrive after a newer request was issued.
/// - A failed request never clears what is already on screen.
pub struct MapView {
    search: RadiusSearch,
    directions: DirectionsLauncher,
    location: Recipient<GetCurrentPosition>,
    location_timeout: Duration,
    default_radius_km: f64,
    search_mode: SearchMode,

    all_restaurants: Vec<RestaurantRecord>,
    nearby: Option<NearbyResults>,
    self_location: Option<Coordinate>,
    markers: MarkerSet,
    selection: SelectionController,
    camera: Option<ViewAnimation>,
    clicked: Option<Coordinate>,
    travel_mode: TravelMode,

    load_seq: u64,
    nearby_seq: u64,
    location_seq: u64,
    logger: Logger,
}

impl MapView {
    pub fn new(
        search: RadiusSearch,
        directions: DirectionsLauncher,
        location: Recipient<GetCurrentPosition>,
        config: &Config,
    ) -> Self {
        Self {
            search,
            directions,
            location,
            location_timeout: config.location_timeout,
            default_radius_km: config.radius_km,
            search_mode: config.search_mode,
            all_restaurants: Vec::new(),
            nearby: None,
            self_location: None,
            markers: MarkerSet::new(),
            selection: SelectionController::new(),
            camera: None,
            clicked: None,
            travel_mode: TravelMode::default(),
            load_seq: 0,
            nearby_seq: 0,
            location_seq: 0,
            logger: Logger::new("MapView", Color::Green),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn active(&self) -> Vec<Listing> {
        match &self.nearby {
            Some(nearby) => nearby.results.iter().cloned().map(Listing::from).collect(),
            None => self
                .all_restaurants
                .iter()
                .cloned()
                .map(Listing::from)
                .collect(),
        }
    }

    /// Redraws the markers from the active set and drops a selection that
    /// is no longer listed.
    fn refresh(&mut self) {
        let active = self.active();
        let current = std::mem::take(&mut self.markers);
        self.markers = MarkerReconciler::reconcile(current, &active, self.self_location);
        if self.selection.retain_active(&active) {
            self.logger
                .info("Selected restaurant is no longer listed, selection cleared.");
        }
    }

    /// Closest marker within [`MARKER_HIT_RADIUS_KM`] of `position`.
    fn hit_test(&self, position: Coordinate) -> Option<MarkerTag> {
        self.markers
            .iter()
            .map(|marker| (marker, calculate_distance(marker.position, position)))
            .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS_KM)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(marker, _)| marker.tag.clone())
    }

    fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            listings: self.active(),
            markers: self.markers.clone(),
            selected: self.selection.selected().cloned(),
            self_location: self.self_location,
            overlay: self.nearby.as_ref().map(|n| n.overlay),
            camera: self.camera,
            clicked: self.clicked,
            travel_mode: self.travel_mode,
        }
    }
}

impl Actor for MapView {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("MapView started");
    }
}

impl Handler<LoadRestaurants> for MapView {
    type Result = ResponseActFuture<Self, Result<RequestOutcome, DiscoveryError>>;

    fn handle(&mut self, _msg: LoadRestaurants, _ctx: &mut Self::Context) -> Self::Result {
        self.load_seq += 1;
        let seq = self.load_seq;
        let search = self.search.clone();

        Box::pin(
            async move { search.fetch_all().await }
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    if seq != act.load_seq {
                        act.logger.debug(format!("Discarding stale restaurants load #{}", seq));
                        return Ok(RequestOutcome::Discarded);
                    }
                    let restaurants = result?;
                    let count = restaurants.len();
                    act.all_restaurants = restaurants;
                    act.refresh();
                    act.logger.info(format!("{} restaurants loaded", count));
                    Ok(RequestOutcome::Applied { count })
                }),
        )
    }
}

impl Handler<LocateUser> for MapView {
    type Result = ResponseActFuture<Self, Result<Option<Coordinate>, DiscoveryError>>;

    fn handle(&mut self, _msg: LocateUser, _ctx: &mut Self::Context) -> Self::Result {
        self.location_seq += 1;
        let seq = self.location_seq;
        let location = self.location.clone();
        let timeout = self.location_timeout;

        Box::pin(
            async move { request_position(&location, timeout).await }
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    if seq != act.location_seq {
                        return Ok(None);
                    }
                    match result {
                        Ok(position) => {
                            act.self_location = Some(position);
                            act.refresh();
                            act.logger.info(format!("You are at {}", position));
                            Ok(Some(position))
                        }
                        Err(e) => {
                            act.logger.warn(format!("Error getting location: {}", e));
                            Err(DiscoveryError::LocationUnavailable(e))
                        }
                    }
                }),
        )
    }
}

impl Handler<ShowNearby> for MapView {
    type Result = ResponseActFuture<Self, Result<RequestOutcome, DiscoveryError>>;

    fn handle(&mut self, msg: ShowNearby, _ctx: &mut Self::Context) -> Self::Result {
        let radius_km = msg.radius_km.unwrap_or(self.default_radius_km);
        let Some(center) = self.self_location else {
            self.logger
                .warn("Location unknown, nearby search skipped. Try 'locate' first.");
            return Box::pin(fut::ready(Ok(RequestOutcome::Skipped)));
        };
        let query = match SearchQuery::new(center, radius_km, self.search_mode) {
            Ok(query) => query,
            Err(e) => return Box::pin(fut::ready(Err(e.into()))),
        };

        self.nearby_seq += 1;
        let seq = self.nearby_seq;
        let search = self.search.clone();

        Box::pin(
            async move { search.search(query).await }
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    if seq != act.nearby_seq {
                        act.logger.debug(format!("Discarding stale nearby search #{}", seq));
                        return Ok(RequestOutcome::Discarded);
                    }
                    let results = result?;
                    let count = results.len();
                    act.nearby = Some(NearbyResults {
                        results,
                        overlay: RadiusOverlay { center, radius_km },
                    });
                    act.camera = Some(ViewAnimation::to(center, NEARBY_ZOOM));
                    act.refresh();
                    Ok(RequestOutcome::Applied { count })
                }),
        )
    }
}

impl Handler<ClearNearby> for MapView {
    type Result = ();

    fn handle(&mut self, _msg: ClearNearby, _ctx: &mut Self::Context) -> Self::Result {
        // una búsqueda en vuelo ya no debe aplicarse
        self.nearby_seq += 1;
        if self.nearby.take().is_some() {
            self.refresh();
            self.logger.info("Showing all restaurants");
        }
    }
}

impl Handler<MapClicked> for MapView {
    type Result = Option<ViewAnimation>;

    fn handle(&mut self, msg: MapClicked, _ctx: &mut Self::Context) -> Self::Result {
        self.clicked = Some(msg.position);
        let hit = self.hit_test(msg.position);
        let active = self.active();
        let animation = self.selection.on_map_click(hit.as_ref(), &active);
        if animation.is_some() {
            self.camera = animation;
        }
        animation
    }
}

impl Handler<ActivateListEntry> for MapView {
    type Result = Option<ViewAnimation>;

    fn handle(&mut self, msg: ActivateListEntry, _ctx: &mut Self::Context) -> Self::Result {
        let listing = self
            .active()
            .into_iter()
            .find(|l| l.id() == msg.restaurant_id)?;
        let animation = self.selection.on_list_activate(listing);
        self.camera = Some(animation);
        Some(animation)
    }
}

impl Handler<SetTravelMode> for MapView {
    type Result = ();

    fn handle(&mut self, msg: SetTravelMode, _ctx: &mut Self::Context) -> Self::Result {
        self.travel_mode = msg.0;
    }
}

impl Handler<Navigate> for MapView {
    type Result = ResponseFuture<Option<DirectionsRequest>>;

    fn handle(&mut self, _msg: Navigate, _ctx: &mut Self::Context) -> Self::Result {
        let Some(selected) = self.selection.selected() else {
            self.logger.warn("Select a restaurant before asking for directions.");
            return Box::pin(async { None });
        };
        let destination = selected.restaurant.position;
        let origin = self.self_location;
        let mode = self.travel_mode;
        let directions = self.directions.clone();
        Box::pin(async move { Some(directions.launch(destination, origin, mode).await) })
    }
}

impl Handler<RecenterOnSelf> for MapView {
    type Result = Option<ViewAnimation>;

    fn handle(&mut self, _msg: RecenterOnSelf, _ctx: &mut Self::Context) -> Self::Result {
        let animation = ViewAnimation::to(self.self_location?, SELF_ZOOM);
        self.camera = Some(animation);
        Some(animation)
    }
}

impl Handler<GetMapState> for MapView {
    type Result = MessageResult<GetMapState>;

    fn handle(&mut self, _msg: GetMapState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_actors::location::LocationService;
    use crate::test_support::{
        FakeStore, ScriptedLocation, center, km_north, record_km_north, result_km_north,
    };
    use common::constants::DEFAULT_DIRECTIONS_URL;
    use common::errors::{LocationError, StoreError, ValidationError};
    use ntest::timeout;

    fn start_map(store: &FakeStore, location: LocationService) -> Addr<MapView> {
        let location = location
            .with_logger(Logger::quiet("location"))
            .start()
            .recipient();
        start_map_with(store, location)
    }

    fn start_map_with(store: &FakeStore, location: Recipient<GetCurrentPosition>) -> Addr<MapView> {
        let directions = DirectionsLauncher::new(
            location.clone(),
            DEFAULT_DIRECTIONS_URL,
            Duration::from_millis(200),
        )
        .with_logger(Logger::quiet("directions"));
        let config = Config {
            location_timeout: Duration::from_millis(200),
            ..Config::default()
        };
        MapView::new(store.radius_search(), directions, location, &config)
            .with_logger(Logger::quiet("map"))
            .start()
    }

    fn three_restaurants() -> FakeStore {
        FakeStore::with_restaurants(vec![
            record_km_north("a", 1.0),
            record_km_north("b", 3.0),
            record_km_north("c", 20.0),
        ])
    }

    fn ids(snapshot: &MapSnapshot) -> Vec<&str> {
        snapshot.listings.iter().map(Listing::id).collect()
    }

    #[actix_rt::test]
    async fn test_load_and_locate_draw_one_marker_each() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));

        let outcome = map.send(LoadRestaurants).await.unwrap().unwrap();
        assert_eq!(outcome, RequestOutcome::Applied { count: 3 });
        assert_eq!(map.send(LocateUser).await.unwrap(), Ok(Some(center())));

        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["a", "b", "c"]);
        assert_eq!(snapshot.markers.len(), 4);
        assert!(snapshot.markers.self_marker().is_some());
    }

    #[actix_rt::test]
    async fn test_nearby_toggle() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();
        map.send(LocateUser).await.unwrap().unwrap();

        let outcome = map
            .send(ShowNearby {
                radius_km: Some(5.0),
            })
            .await
            .unwrap();
        assert_eq!(outcome, Ok(RequestOutcome::Applied { count: 2 }));

        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["a", "b"]);
        assert_eq!(snapshot.markers.len(), 3);
        assert_eq!(
            snapshot.overlay,
            Some(RadiusOverlay {
                center: center(),
                radius_km: 5.0
            })
        );
        assert_eq!(snapshot.camera.unwrap().zoom, 13.0);

        map.send(ClearNearby).await.unwrap();
        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["a", "b", "c"]);
        assert_eq!(snapshot.markers.len(), 4);
        assert!(snapshot.overlay.is_none());
    }

    #[actix_rt::test]
    async fn test_nearby_without_location_is_skipped() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::failing(LocationError::PermissionDenied));

        assert_eq!(
            map.send(LocateUser).await.unwrap(),
            Err(DiscoveryError::LocationUnavailable(LocationError::PermissionDenied))
        );
        let outcome = map.send(ShowNearby { radius_km: None }).await.unwrap();
        assert_eq!(outcome, Ok(RequestOutcome::Skipped));
        assert_eq!(store.nearby_calls(), 0);
    }

    #[actix_rt::test]
    async fn test_invalid_radius_never_reaches_store() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LocateUser).await.unwrap().unwrap();

        let outcome = map
            .send(ShowNearby {
                radius_km: Some(0.0),
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Err(DiscoveryError::InvalidInput(ValidationError::InvalidRadius(0.0)))
        );
        assert_eq!(store.nearby_calls(), 0);
    }

    #[actix_rt::test]
    async fn test_failed_search_keeps_previous_results() {
        let store = FakeStore::default()
            .script_nearby(Ok(vec![result_km_north("a", 1.0)]))
            .script_nearby(Err(StoreError::Unavailable("timeout".into())));
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LocateUser).await.unwrap().unwrap();

        let first = map.send(ShowNearby { radius_km: None }).await.unwrap();
        assert_eq!(first, Ok(RequestOutcome::Applied { count: 1 }));

        let second = map.send(ShowNearby { radius_km: None }).await.unwrap();
        assert!(matches!(second, Err(DiscoveryError::SearchFailed(_))));

        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["a"]);
        assert_eq!(snapshot.markers.len(), 2);
    }

    #[actix_rt::test]
    #[timeout(5000)]
    async fn test_stale_nearby_response_is_discarded() {
        let store = FakeStore::default()
            .script_nearby_after(
                Duration::from_millis(300),
                Ok(vec![result_km_north("a", 1.0), result_km_north("b", 3.0)]),
            )
            .script_nearby(Ok(vec![result_km_north("b", 3.0)]));
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LocateUser).await.unwrap().unwrap();

        let slow = map.send(ShowNearby { radius_km: None });
        // la primera búsqueda tiene que tomar la respuesta lenta
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = map.send(ShowNearby { radius_km: None }).await.unwrap();
        assert_eq!(fast, Ok(RequestOutcome::Applied { count: 1 }));

        assert_eq!(slow.await.unwrap(), Ok(RequestOutcome::Discarded));
        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["b"]);
    }

    #[actix_rt::test]
    #[timeout(5000)]
    async fn test_clear_nearby_wins_over_search_in_flight() {
        let store = three_restaurants().script_nearby_after(
            Duration::from_millis(200),
            Ok(vec![result_km_north("a", 1.0)]),
        );
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();
        map.send(LocateUser).await.unwrap().unwrap();

        let pending = map.send(ShowNearby { radius_km: None });
        map.send(ClearNearby).await.unwrap();

        assert_eq!(pending.await.unwrap(), Ok(RequestOutcome::Discarded));
        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(snapshot.listings.len(), 3);
        assert!(snapshot.overlay.is_none());
    }

    #[actix_rt::test]
    #[timeout(5000)]
    async fn test_stale_load_is_discarded() {
        let store = FakeStore::default()
            .script_snapshot_after(
                Duration::from_millis(150),
                Ok(vec![
                    record_km_north("a", 1.0),
                    record_km_north("b", 3.0),
                    record_km_north("c", 20.0),
                ]),
            )
            .script_snapshot_after(Duration::ZERO, Ok(vec![record_km_north("b", 3.0)]));
        let map = start_map(&store, LocationService::fixed(center()));

        let slow = map.send(LoadRestaurants);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = map.send(LoadRestaurants).await.unwrap();
        assert_eq!(fast, Ok(RequestOutcome::Applied { count: 1 }));

        assert_eq!(slow.await.unwrap(), Ok(RequestOutcome::Discarded));
        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(ids(&snapshot), vec!["b"]);
        assert_eq!(snapshot.markers.len(), 1);
    }

    #[actix_rt::test]
    #[timeout(5000)]
    async fn test_stale_location_is_discarded() {
        let store = FakeStore::default();
        let location = ScriptedLocation::new(vec![
            (Duration::from_millis(150), Ok(km_north(9.0))),
            (Duration::ZERO, Ok(center())),
        ])
        .start()
        .recipient();
        let map = start_map_with(&store, location);

        let slow = map.send(LocateUser);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(map.send(LocateUser).await.unwrap(), Ok(Some(center())));

        assert_eq!(slow.await.unwrap(), Ok(None));
        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(snapshot.self_location, Some(center()));
        assert_eq!(snapshot.markers.self_marker().unwrap().position, center());
    }

    #[actix_rt::test]
    async fn test_marker_click_selects_and_empty_click_clears() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();

        let animation = map
            .send(MapClicked {
                position: km_north(3.0),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(animation.zoom, 17.0);
        assert_eq!(animation.center, km_north(3.0));

        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(snapshot.selected.as_ref().map(Listing::id), Some("b"));
        assert_eq!(snapshot.clicked, Some(km_north(3.0)));

        let empty = map
            .send(MapClicked {
                position: km_north(10.0),
            })
            .await
            .unwrap();
        assert!(empty.is_none());
        let snapshot = map.send(GetMapState).await.unwrap();
        assert!(snapshot.selected.is_none());
        assert_eq!(snapshot.clicked, Some(km_north(10.0)));
    }

    #[actix_rt::test]
    async fn test_selection_cleared_when_nearby_drops_it() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();
        map.send(LocateUser).await.unwrap().unwrap();

        let activated = map
            .send(ActivateListEntry {
                restaurant_id: "c".into(),
            })
            .await
            .unwrap();
        assert!(activated.is_some());

        map.send(ShowNearby {
            radius_km: Some(5.0),
        })
        .await
        .unwrap()
        .unwrap();
        let snapshot = map.send(GetMapState).await.unwrap();
        assert!(snapshot.selected.is_none());
    }

    #[actix_rt::test]
    async fn test_unknown_list_entry_is_ignored() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();

        let activated = map
            .send(ActivateListEntry {
                restaurant_id: "zzz".into(),
            })
            .await
            .unwrap();
        assert!(activated.is_none());
    }

    #[actix_rt::test]
    async fn test_navigate_to_selection() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();

        assert!(map.send(Navigate).await.unwrap().is_none());

        map.send(LocateUser).await.unwrap().unwrap();
        map.send(ActivateListEntry {
            restaurant_id: "a".into(),
        })
        .await
        .unwrap();
        map.send(SetTravelMode(TravelMode::Walking)).await.unwrap();

        let request = map.send(Navigate).await.unwrap().unwrap();
        assert_eq!(request.origin, Some(center()));
        assert_eq!(request.destination, km_north(1.0));
        assert!(request.url.contains("travelmode=walking"));
        let minutes = request.estimated_minutes.unwrap();
        assert!((minutes - 12.0).abs() < 0.01);
    }

    #[actix_rt::test]
    async fn test_recenter_needs_location() {
        let store = FakeStore::default();
        let map = start_map(&store, LocationService::fixed(center()));

        assert!(map.send(RecenterOnSelf).await.unwrap().is_none());
        map.send(LocateUser).await.unwrap().unwrap();
        let animation = map.send(RecenterOnSelf).await.unwrap().unwrap();
        assert_eq!(animation.center, center());
        assert_eq!(animation.zoom, 15.0);
    }

    #[actix_rt::test]
    async fn test_failed_load_keeps_markers() {
        let store = three_restaurants();
        let map = start_map(&store, LocationService::fixed(center()));
        map.send(LoadRestaurants).await.unwrap().unwrap();

        let broken = store.clone().fail_snapshot(StoreError::Unavailable("down".into()));
        let outcome = map.send(LoadRestaurants).await.unwrap();
        assert!(matches!(outcome, Err(DiscoveryError::StoreUnavailable(_))));
        assert_eq!(broken.snapshot_calls(), 2);

        let snapshot = map.send(GetMapState).await.unwrap();
        assert_eq!(snapshot.markers.len(), 3);
    }
}

use crate::client_actors::location::request_position;
use crate::client_actors::map_view::RequestOutcome;
use crate::messages::internal_messages::{
    FillDetails, GetRegistrationState, PickLocation, PrepareRegistration, SubmitRegistration,
};
use crate::radius_search::{RadiusSearch, SearchQuery};
use crate::registration::{Registrar, RegistrationForm};
use crate::session::SessionContext;
use actix::fut;
use actix::prelude::*;
use colored::Color;
use common::config::Config;
use common::errors::{DiscoveryError, LocationError};
use common::logger::Logger;
use common::messages::GetCurrentPosition;
use common::reconciler::MarkerReconciler;
use common::types::coordinate::Coordinate;
use common::types::marker::MarkerSet;
use common::types::restaurant_info::RestaurantRecord;
use common::types::search_result::{SearchMode, SearchResult};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSnapshot {
    pub form: RegistrationForm,
    pub picked: Option<Coordinate>,
    pub self_location: Option<Coordinate>,
    /// Restaurants already registered around the owner.
    pub nearby: Vec<SearchResult>,
    pub markers: MarkerSet,
}

/// Actor RegistrationView: the "register your restaurant" screen.
///
/// ## Responsibilities
/// - Locates the owner once and shows the restaurants already registered
///   around them, filtered locally from the full snapshot.
/// - Lets the owner pick the restaurant location on the map, keeping a
///   single pick marker.
/// - Submits the form for the session's identity.
pub struct RegistrationView {
    registrar: Registrar,
    search: RadiusSearch,
    location: Recipient<GetCurrentPosition>,
    location_timeout: Duration,
    radius_km: f64,
    session: SessionContext,

    form: RegistrationForm,
    picked: Option<Coordinate>,
    self_location: Option<Coordinate>,
    nearby: Vec<SearchResult>,
    markers: MarkerSet,

    prepare_seq: u64,
    submitting: bool,
    logger: Logger,
}

impl RegistrationView {
    pub fn new(
        registrar: Registrar,
        search: RadiusSearch,
        location: Recipient<GetCurrentPosition>,
        session: SessionContext,
        config: &Config,
    ) -> Self {
        Self {
            registrar,
            search,
            location,
            location_timeout: config.location_timeout,
            radius_km: config.radius_km,
            session,
            form: RegistrationForm::default(),
            picked: None,
            self_location: None,
            nearby: Vec::new(),
            markers: MarkerSet::new(),
            prepare_seq: 0,
            submitting: false,
            logger: Logger::new("Registration", Color::Magenta),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn refresh(&mut self) {
        let current = std::mem::take(&mut self.markers);
        self.markers = MarkerReconciler::reconcile_with_pick(
            current,
            &self.nearby,
            self.self_location,
            self.picked,
        );
    }
}

impl Actor for RegistrationView {
    type Context = Context<Self>;
}

impl Handler<PrepareRegistration> for RegistrationView {
    type Result = ResponseActFuture<Self, Result<RequestOutcome, DiscoveryError>>;

    fn handle(&mut self, _msg: PrepareRegistration, _ctx: &mut Self::Context) -> Self::Result {
        self.prepare_seq += 1;
        let seq = self.prepare_seq;
        let location = self.location.clone();
        let timeout = self.location_timeout;
        let radius_km = self.radius_km;
        let search = self.search.clone();

        Box::pin(
            async move {
                let center = request_position(&location, timeout).await?;
                let query = SearchQuery::new(center, radius_km, SearchMode::Local);
                let nearby = match query {
                    Ok(query) => search.search(query).await,
                    Err(e) => Err(e.into()),
                };
                Ok::<_, LocationError>((center, nearby))
            }
            .into_actor(self)
            .map(move |lookup, act, _ctx| {
                if seq != act.prepare_seq {
                    return Ok(RequestOutcome::Discarded);
                }
                let (center, nearby) = match lookup {
                    Ok(found) => found,
                    Err(e) => {
                        // sin ubicación el formulario sigue disponible
                        act.logger
                            .warn(format!("Error getting location: {}. Pick the location by hand.", e));
                        return Ok(RequestOutcome::Skipped);
                    }
                };
                act.self_location = Some(center);
                let outcome = match nearby {
                    Ok(results) => {
                        let count = results.len();
                        act.nearby = results;
                        Ok(RequestOutcome::Applied { count })
                    }
                    Err(e) => Err(e),
                };
                act.refresh();
                outcome
            }),
        )
    }
}

impl Handler<PickLocation> for RegistrationView {
    type Result = ();

    fn handle(&mut self, msg: PickLocation, _ctx: &mut Self::Context) -> Self::Result {
        self.picked = Some(msg.position);
        self.form.pick_location(msg.position);
        self.refresh();
        self.logger.info(format!(
            "Location picked: {}, {}",
            self.form.latitude, self.form.longitude
        ));
    }
}

impl Handler<FillDetails> for RegistrationView {
    type Result = ();

    fn handle(&mut self, msg: FillDetails, _ctx: &mut Self::Context) -> Self::Result {
        msg.apply(&mut self.form);
    }
}

impl Handler<SubmitRegistration> for RegistrationView {
    type Result = ResponseActFuture<Self, Result<RestaurantRecord, DiscoveryError>>;

    fn handle(&mut self, _msg: SubmitRegistration, _ctx: &mut Self::Context) -> Self::Result {
        if self.submitting {
            self.logger.warn("A registration is already being submitted.");
            return Box::pin(fut::ready(Err(DiscoveryError::InProgress("registration"))));
        }
        self.submitting = true;
        let registrar = self.registrar.clone();
        let session = self.session.clone();
        let form = self.form.clone();
        let submitted = form.clone();

        Box::pin(
            async move { registrar.register(&session, &form).await }
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    act.submitting = false;
                    if result.is_ok() {
                        if act.form == submitted {
                            act.form = RegistrationForm::default();
                            act.picked = None;
                            act.refresh();
                        } else {
                            // cambios hechos durante el envío se conservan
                            act.logger
                                .info("Form edited while submitting, keeping the new values.");
                        }
                    }
                    result
                }),
        )
    }
}

impl Handler<GetRegistrationState> for RegistrationView {
    type Result = MessageResult<GetRegistrationState>;

    fn handle(&mut self, _msg: GetRegistrationState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(RegistrationSnapshot {
            form: self.form.clone(),
            picked: self.picked,
            self_location: self.self_location,
            nearby: self.nearby.clone(),
            markers: self.markers.clone(),
        })
    }
}

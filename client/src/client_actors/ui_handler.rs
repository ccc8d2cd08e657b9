use crate::client_actors::map_view::{MapSnapshot, MapView, RequestOutcome};
use crate::client_actors::registration_view::RegistrationView;
use crate::messages::internal_messages::{
    ActivateListEntry, ClearNearby, FillDetails, GetMapState, GetRegistrationState,
    LoadRestaurants, LocateUser, MapClicked, Navigate, PickLocation, PrepareRegistration,
    RecenterOnSelf, SetTravelMode, ShowNearby, SubmitRegistration, UserInput,
};
use actix::prelude::*;
use colored::Color;
use common::errors::DiscoveryError;
use common::logger::Logger;
use common::types::coordinate::{Coordinate, parse_degrees};
use common::types::search_result::Listing;
use common::types::travel_mode::TravelMode;

const HELP: &str = "\
Commands:
  all                      reload and show every restaurant
  nearby [km]              restaurants around you
  clear                    back to every restaurant
  list                     list and selected restaurant
  select <n>               select entry n of the list
  click <lat> <lon>        click the map
  mode <walking|driving>   travel mode for directions
  go                       directions to the selected restaurant
  locate                   look up your location
  me                       center the map on you
  newplace                 open the registration map
  pick <lat> <lon>         restaurant location for the registration
  register <name>|<description>|<address>[|<phone>|<cuisine>|<hours>|<rating>]
  help
  quit";

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    All,
    Nearby(Option<f64>),
    Clear,
    List,
    Select(usize),
    Click(Coordinate),
    Mode(TravelMode),
    Go,
    Locate,
    Me,
    NewPlace,
    Pick(Coordinate),
    Register(FillDetails),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match word.to_lowercase().as_str() {
        "all" => Ok(UiCommand::All),
        "nearby" => match args.as_slice() {
            [] => Ok(UiCommand::Nearby(None)),
            [km] => km
                .parse::<f64>()
                .map(|km| UiCommand::Nearby(Some(km)))
                .map_err(|_| format!("'{}' is not a radius in km", km)),
            _ => Err("usage: nearby [km]".to_string()),
        },
        "clear" => Ok(UiCommand::Clear),
        "list" => Ok(UiCommand::List),
        "select" => match args.as_slice() {
            [n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(UiCommand::Select(n)),
                _ => Err(format!("'{}' is not a list entry", n)),
            },
            _ => Err("usage: select <n>".to_string()),
        },
        "click" => parse_position(&args).map(UiCommand::Click),
        "pick" => parse_position(&args).map(UiCommand::Pick),
        "mode" => match args.as_slice() {
            [mode] => mode.parse::<TravelMode>().map(UiCommand::Mode),
            _ => Err("usage: mode <walking|driving>".to_string()),
        },
        "go" => Ok(UiCommand::Go),
        "locate" => Ok(UiCommand::Locate),
        "me" => Ok(UiCommand::Me),
        "newplace" => Ok(UiCommand::NewPlace),
        "register" => parse_details(rest).map(UiCommand::Register),
        "help" | "?" => Ok(UiCommand::Help),
        "quit" | "exit" => Ok(UiCommand::Quit),
        "" => Err("empty command, type 'help'".to_string()),
        other => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

fn parse_position(args: &[&str]) -> Result<Coordinate, String> {
    let [lat, lon] = args else {
        return Err("expected <lat> <lon>".to_string());
    };
    let latitude = parse_degrees("latitude", lat).map_err(|e| e.to_string())?;
    let longitude = parse_degrees("longitude", lon).map_err(|e| e.to_string())?;
    Coordinate::new(latitude, longitude).map_err(|e| e.to_string())
}

/// `name|description|address[|phone|cuisine|hours|rating]`. Required fields
/// are checked by the form itself on submit.
fn parse_details(rest: &str) -> Result<FillDetails, String> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if fields.len() < 3 || fields.len() > 7 {
        return Err("usage: register <name>|<description>|<address>[|<phone>|<cuisine>|<hours>|<rating>]".to_string());
    }
    let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
    let rating = match fields.get(6) {
        None | Some(&"") => 0,
        Some(raw) => raw
            .parse::<u8>()
            .map_err(|_| format!("'{}' is not a rating", raw))?,
    };
    Ok(FillDetails {
        name: field(0),
        description: field(1),
        address: field(2),
        phone: field(3),
        cuisine_type: field(4),
        opening_hours: field(5),
        rating,
    })
}

/// Actor UIHandler: Interfaz humano-sistema
///
/// Turns terminal lines into messages for the map and registration screens
/// and prints what they show.
pub struct UIHandler {
    map: Addr<MapView>,
    registration: Addr<RegistrationView>,
    logger: Logger,
}

impl UIHandler {
    pub fn new(map: Addr<MapView>, registration: Addr<RegistrationView>) -> Self {
        Self {
            map,
            registration,
            logger: Logger::new("UI", Color::BrightWhite),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("UIHandler iniciado! Type 'help' for the commands.");
    }
}

impl Handler<UserInput> for UIHandler {
    type Result = ResponseFuture<bool>;

    fn handle(&mut self, msg: UserInput, _ctx: &mut Self::Context) -> Self::Result {
        let command = match parse_command(&msg.0) {
            Ok(UiCommand::Quit) => return Box::pin(async { false }),
            Ok(command) => command,
            Err(e) => {
                self.logger.warn(e);
                return Box::pin(async { true });
            }
        };
        let map = self.map.clone();
        let registration = self.registration.clone();
        let logger = self.logger.clone();

        Box::pin(async move {
            if let Err(e) = run(command, &map, &registration, &logger).await {
                logger.error(e.to_string());
            }
            true
        })
    }
}

async fn run(
    command: UiCommand,
    map: &Addr<MapView>,
    registration: &Addr<RegistrationView>,
    logger: &Logger,
) -> Result<(), DiscoveryError> {
    match command {
        UiCommand::All => {
            map.send(ClearNearby).await?;
            report(logger, map.send(LoadRestaurants).await??);
            render_list(logger, &map.send(GetMapState).await?);
        }
        UiCommand::Nearby(radius_km) => {
            let outcome = map.send(ShowNearby { radius_km }).await??;
            report(logger, outcome);
            if let RequestOutcome::Applied { .. } = outcome {
                render_list(logger, &map.send(GetMapState).await?);
            }
        }
        UiCommand::Clear => {
            map.send(ClearNearby).await?;
            render_list(logger, &map.send(GetMapState).await?);
        }
        UiCommand::List => {
            let snapshot = map.send(GetMapState).await?;
            render_list(logger, &snapshot);
            match &snapshot.selected {
                Some(listing) => render_detail(logger, listing),
                None => logger.info("No restaurant selected."),
            }
        }
        UiCommand::Select(n) => {
            let snapshot = map.send(GetMapState).await?;
            let Some(listing) = n.checked_sub(1).and_then(|i| snapshot.listings.get(i)) else {
                logger.warn(format!("There is no entry {} in the list.", n));
                return Ok(());
            };
            let restaurant_id = listing.id().to_string();
            if map.send(ActivateListEntry { restaurant_id }).await?.is_some() {
                render_detail(logger, listing);
            }
        }
        UiCommand::Click(position) => {
            let animation = map.send(MapClicked { position }).await?;
            logger.info(format!(
                "Clicked at {:.6}, {:.6}",
                position.latitude(),
                position.longitude()
            ));
            match animation {
                Some(_) => {
                    let snapshot = map.send(GetMapState).await?;
                    if let Some(listing) = &snapshot.selected {
                        render_detail(logger, listing);
                    }
                }
                None => logger.info("No restaurant there, selection cleared."),
            }
        }
        UiCommand::Mode(mode) => {
            map.send(SetTravelMode(mode)).await?;
            logger.info(format!("Travel mode: {}", mode));
        }
        UiCommand::Go => {
            if let Some(request) = map.send(Navigate).await? {
                if let Some(minutes) = request.estimated_minutes {
                    logger.info(format!("About {:.0} min {}", minutes, request.mode));
                }
                logger.info(format!("Open: {}", request.url));
            }
        }
        UiCommand::Locate => {
            if let Some(position) = map.send(LocateUser).await?? {
                logger.info(format!("Location: {}", position));
            }
        }
        UiCommand::Me => match map.send(RecenterOnSelf).await? {
            Some(animation) => logger.info(format!(
                "Map centered on you at {} (zoom {})",
                animation.center, animation.zoom
            )),
            None => logger.warn("Location unknown. Try 'locate' first."),
        },
        UiCommand::NewPlace => {
            let outcome = registration.send(PrepareRegistration).await??;
            report(logger, outcome);
            let state = registration.send(GetRegistrationState).await?;
            for result in &state.nearby {
                logger.info(format!(
                    "  {} ({:.1} km)",
                    result.restaurant.name, result.distance_km
                ));
            }
            logger.info("Use 'pick <lat> <lon>' and then 'register ...'.");
        }
        UiCommand::Pick(position) => {
            registration.send(PickLocation { position }).await?;
        }
        UiCommand::Register(details) => {
            registration.send(details).await?;
            let record = registration.send(SubmitRegistration).await??;
            logger.info(format!(
                "Restaurant '{}' registered with id {}",
                record.name, record.id
            ));
            map.send(LoadRestaurants).await??;
        }
        UiCommand::Help => logger.info(HELP),
        UiCommand::Quit => {}
    }
    Ok(())
}

fn report(logger: &Logger, outcome: RequestOutcome) {
    match outcome {
        RequestOutcome::Applied { count } => logger.info(format!("{} restaurants found", count)),
        RequestOutcome::Discarded => logger.debug("A newer request already updated the map."),
        RequestOutcome::Skipped => {}
    }
}

fn render_list(logger: &Logger, snapshot: &MapSnapshot) {
    if let Some(overlay) = &snapshot.overlay {
        logger.info(format!(
            "Within {} km of {}:",
            overlay.radius_km, overlay.center
        ));
    }
    if snapshot.listings.is_empty() {
        logger.info("No restaurants to show.");
        return;
    }
    for (i, listing) in snapshot.listings.iter().enumerate() {
        let restaurant = &listing.restaurant;
        let mut line = format!("{}. {}", i + 1, restaurant.name);
        if let Some(distance) = listing.distance_km {
            line.push_str(&format!(" - {:.1} km", distance));
        }
        if let Some(cuisine) = &restaurant.cuisine_type {
            line.push_str(&format!(" - {}", cuisine));
        }
        if let Some(rating) = restaurant.rating {
            line.push_str(&format!(" - {}", rating));
        }
        logger.info(line);
    }
}

fn render_detail(logger: &Logger, listing: &Listing) {
    let restaurant = &listing.restaurant;
    let mut lines = vec![format!("== {} ==", restaurant.name)];
    if let Some(description) = &restaurant.description {
        lines.push(description.clone());
    }
    lines.push(format!("Address: {}", restaurant.address));
    let optional = [
        ("Phone", restaurant.phone.as_ref()),
        ("Cuisine", restaurant.cuisine_type.as_ref()),
        ("Hours", restaurant.opening_hours.as_ref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    }
    if let Some(rating) = restaurant.rating {
        lines.push(format!("Rating: {}", rating));
    }
    if let Some(distance) = listing.distance_km {
        lines.push(format!("Distance: {:.1} km", distance));
    }
    logger.info(lines.join("\n"));
}

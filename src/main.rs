use actix::prelude::*;
use client::client_actors::location::LocationService;
use client::client_actors::map_view::MapView;
use client::client_actors::registration_view::RegistrationView;
use client::client_actors::ui_handler::UIHandler;
use client::directions::DirectionsLauncher;
use client::messages::internal_messages::{LoadRestaurants, LocateUser, UserInput};
use client::radius_search::RadiusSearch;
use client::registration::Registrar;
use client::session::SessionContext;
use colored::Color;
use common::config::Config;
use common::logger::{LogLevel, Logger};
use common::messages::InsertRestaurant;
use common::types::restaurant_info::NewRestaurant;
use server::server_actors::services::nearby_restaurants::NearbyRestaurantsService;
use server::server_actors::storage::Storage;
use std::env;
use std::fs;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

const DEFAULT_SEED_PATH: &str = "data/restaurants.json";

fn component_logger(name: &str, color: Color, level: LogLevel) -> Logger {
    Logger::new(name, color).with_level(level)
}

/// Loads the seed file into the store. A missing or malformed file leaves
/// the store empty.
async fn seed_store(storage: &Addr<Storage>, path: &str, logger: &Logger) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            logger.warn(format!("Cannot read seed file {}: {}. Starting empty.", path, e));
            return;
        }
    };
    let restaurants: Vec<NewRestaurant> = match serde_json::from_str(&raw) {
        Ok(restaurants) => restaurants,
        Err(e) => {
            logger.error(format!("Invalid seed file {}: {}. Starting empty.", path, e));
            return;
        }
    };

    let mut inserted = 0;
    for restaurant in restaurants {
        let name = restaurant.name.clone();
        match storage.send(InsertRestaurant { restaurant }).await {
            Ok(Ok(_)) => inserted += 1,
            Ok(Err(e)) => logger.warn(format!("Seed row '{}' rejected: {}", name, e)),
            Err(e) => logger.error(format!("Storage mailbox error: {}", e)),
        }
    }
    logger.info(format!("{} restaurants loaded from {}", inserted, path));
}

/// Resumes the session for the configured user and stores its role hint for
/// the next run.
fn open_session(config: &Config, logger: &Logger) -> SessionContext {
    let stored = fs::read_to_string(&config.session_file).ok();
    let session = SessionContext::resume(config, stored.as_deref());
    if let Some(hint) = session.stored_hint() {
        save_role_hint(&config.session_file, &hint, logger);
    }
    session
}

fn save_role_hint(path: &Path, hint: &str, logger: &Logger) {
    if let Err(e) = fs::write(path, hint) {
        logger.warn(format!("Cannot save role hint to {}: {}", path.display(), e));
    }
}

#[actix::main]
async fn main() -> std::io::Result<()> {
    let config = Config::load();
    let level = config.log_level;
    let logger = component_logger("Main", Color::BrightBlue, level);
    let seed_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SEED_PATH.to_string());

    // record store de referencia
    let storage = Storage::new()
        .with_logger(component_logger("Storage", Color::Yellow, level))
        .start();
    let nearby = NearbyRestaurantsService::new(storage.clone())
        .with_logger(component_logger("NearbyService", Color::Yellow, level))
        .start();
    seed_store(&storage, &seed_path, &logger).await;

    let location = LocationService::from_config(&config)
        .with_logger(component_logger("Location", Color::Cyan, level))
        .start()
        .recipient();
    let search = RadiusSearch::new(nearby.recipient(), storage.clone().recipient())
        .with_logger(component_logger("RadiusSearch", Color::Blue, level));
    let directions = DirectionsLauncher::new(
        location.clone(),
        config.directions_url.clone(),
        config.location_timeout,
    )
    .with_logger(component_logger("Directions", Color::Blue, level));
    let registrar = Registrar::new(storage.clone().recipient())
        .with_logger(component_logger("Registrar", Color::Magenta, level));
    let session = open_session(&config, &logger);
    match session.identity() {
        Some(identity) => logger.info(format!("Signed in as {}", identity.id)),
        None => logger.info("Not signed in: registration is disabled."),
    }

    let map = MapView::new(search.clone(), directions, location.clone(), &config)
        .with_logger(component_logger("MapView", Color::Green, level))
        .start();
    let registration = RegistrationView::new(registrar, search, location, session, &config)
        .with_logger(component_logger("Registration", Color::Magenta, level))
        .start();
    let ui = UIHandler::new(map.clone(), registration)
        .with_logger(component_logger("UI", Color::BrightWhite, level))
        .start();

    match map.send(LoadRestaurants).await {
        Ok(Err(e)) => logger.error(format!("Error loading restaurants: {}", e)),
        Err(e) => logger.error(format!("MapView mailbox error: {}", e)),
        Ok(Ok(_)) => {}
    }
    if let Ok(Err(e)) = map.send(LocateUser).await {
        logger.warn(format!("{}", e));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = ctrl_c() => {
                logger.info("Ctrl-C recibido, apagando...");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => match ui.send(UserInput(line)).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        logger.error(format!("UI mailbox error: {}", e));
                        break;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    logger.error(format!("Error reading input: {}", e));
                    break;
                }
            }
        }
    }

    System::current().stop();
    Ok(())
}

use crate::constants::{
    DEFAULT_DIRECTIONS_URL, DEFAULT_LOCATION_TIMEOUT_MILLIS, DEFAULT_RADIUS_KM,
    DEFAULT_SESSION_FILE,
};
use crate::logger::{LogLevel, Logger};
use crate::types::coordinate::Coordinate;
use crate::types::search_result::SearchMode;
use crate::types::session::UserRole;
use colored::Color;
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read from `MAP_*` environment variables.
///
/// Missing variables take their default. Malformed ones are reported with a
/// warning and also fall back to the default, so loading never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub radius_km: f64,
    pub search_mode: SearchMode,
    pub directions_url: String,
    pub location_timeout: Duration,
    /// Position reported by the simulated location service.
    pub self_location: Option<Coordinate>,
    pub user_id: Option<String>,
    pub user_role: Option<UserRole>,
    /// File holding the role hint next to the provider session.
    pub session_file: PathBuf,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            search_mode: SearchMode::Remote,
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            location_timeout: Duration::from_millis(DEFAULT_LOCATION_TIMEOUT_MILLIS),
            self_location: None,
            user_id: None,
            user_role: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let logger = Logger::new("Config", Color::White);
        let defaults = Config::default();

        let radius_km = try_load(&logger, &lookup, "MAP_RADIUS_KM", defaults.radius_km);
        let radius_km = if radius_km > 0.0 {
            radius_km
        } else {
            logger.warn(format!(
                "MAP_RADIUS_KM must be positive, using default: {}",
                defaults.radius_km
            ));
            defaults.radius_km
        };

        let timeout_ms = try_load(
            &logger,
            &lookup,
            "MAP_LOCATION_TIMEOUT_MS",
            DEFAULT_LOCATION_TIMEOUT_MILLIS,
        );

        Self {
            radius_km,
            search_mode: try_load(&logger, &lookup, "MAP_SEARCH_MODE", defaults.search_mode),
            directions_url: lookup("MAP_DIRECTIONS_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.directions_url),
            location_timeout: Duration::from_millis(timeout_ms),
            self_location: try_load_optional(&logger, &lookup, "MAP_SELF_LOCATION"),
            user_id: lookup("MAP_USER_ID").filter(|id| !id.trim().is_empty()),
            user_role: try_load_optional(&logger, &lookup, "MAP_USER_ROLE"),
            session_file: lookup("MAP_SESSION_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            log_level: try_load(&logger, &lookup, "MAP_LOG_LEVEL", defaults.log_level),
        }
    }
}

fn try_load<T, F>(logger: &Logger, lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => {
            logger.debug(format!("{key} not set, using default: {default}"));
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            logger.warn(format!("Invalid {key} value '{raw}': {e}. Using default: {default}"));
            default
        }),
    }
}

fn try_load_optional<T, F>(logger: &Logger, lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            logger.warn(format!("Invalid {key} value '{raw}': {e}. Ignoring it."));
            None
        }
    }
}

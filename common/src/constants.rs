/// Mean Earth radius used by the haversine distance, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius used by "Show Nearby" when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// Animaciones de la vista del mapa
pub const SELECTED_ZOOM: f64 = 17.0;
pub const NEARBY_ZOOM: f64 = 13.0;
pub const SELF_ZOOM: f64 = 15.0;
pub const ANIMATION_MILLIS: u64 = 1000;

/// Straight-line travel speeds used for the directions estimate, in km/h.
pub const WALKING_SPEED_KMH: f64 = 5.0;
pub const DRIVING_SPEED_KMH: f64 = 50.0;

pub const DEFAULT_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";
pub const DEFAULT_LOCATION_TIMEOUT_MILLIS: u64 = 5000;

/// Where the role hint is kept between runs.
pub const DEFAULT_SESSION_FILE: &str = ".restaurant-map-session.json";

/// Decimals kept when a map click fills the registration form.
pub const PICKED_COORDINATE_DECIMALS: usize = 6;

/// A map click lands on a marker when it is at most this far from it, in km.
pub const MARKER_HIT_RADIUS_KM: f64 = 0.05;

/// Maximum offset of a simulated location reading, in degrees.
pub const LOCATION_JITTER_DEGREES: f64 = 0.0002;

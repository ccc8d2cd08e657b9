use crate::client_actors::map_view::{MapSnapshot, RequestOutcome};
use crate::client_actors::registration_view::RegistrationSnapshot;
use crate::directions::DirectionsRequest;
use crate::registration::RegistrationForm;
use crate::selection::ViewAnimation;
use actix::Message;
use common::errors::DiscoveryError;
use common::types::coordinate::Coordinate;
use common::types::restaurant_info::RestaurantRecord;
use common::types::travel_mode::TravelMode;

/////////////////////////////////////////////////////////////////////
// Mensajes hacia MapView
/////////////////////////////////////////////////////////////////////

/// Message to fetch the full restaurants table into the map.
///
/// ## Returns
/// [`RequestOutcome::Discarded`] when a newer load was issued meanwhile.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<RequestOutcome, DiscoveryError>")]
pub struct LoadRestaurants;

/// Message to run the one-shot location lookup and redraw the self marker.
///
/// ## Returns
/// The new self location, or `None` when the answer was stale.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<Option<Coordinate>, DiscoveryError>")]
pub struct LocateUser;

/// Message to switch the map to the restaurants around the self location.
///
/// ## Contents
/// - `radius_km`: Search radius; the configured default when `None`.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<RequestOutcome, DiscoveryError>")]
pub struct ShowNearby {
    pub radius_km: Option<f64>,
}

/// Message to go back to the full restaurants set.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct ClearNearby;

/// Message for a click on the map at `position`.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Option<ViewAnimation>")]
pub struct MapClicked {
    pub position: Coordinate,
}

/// Message for the activation of a list entry.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<ViewAnimation>")]
pub struct ActivateListEntry {
    pub restaurant_id: String,
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct SetTravelMode(pub TravelMode);

/// Message to build directions to the selected restaurant.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Option<DirectionsRequest>")]
pub struct Navigate;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Option<ViewAnimation>")]
pub struct RecenterOnSelf;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "MapSnapshot")]
pub struct GetMapState;

/////////////////////////////////////////////////////////////////////
// Mensajes hacia RegistrationView
/////////////////////////////////////////////////////////////////////

/// Message to open the registration map: locate the owner and show the
/// restaurants already registered around them.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<RequestOutcome, DiscoveryError>")]
pub struct PrepareRegistration;

/// Message for a click on the registration map; it sets the restaurant location.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct PickLocation {
    pub position: Coordinate,
}

/// Message with the text fields of the form. Latitude and longitude are
/// left as picked.
#[derive(Message, Debug, Clone, Default, PartialEq)]
#[rtype(result = "()")]
pub struct FillDetails {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub cuisine_type: String,
    pub opening_hours: String,
    pub rating: u8,
}

impl FillDetails {
    pub fn apply(self, form: &mut RegistrationForm) {
        form.name = self.name;
        form.description = self.description;
        form.address = self.address;
        form.phone = self.phone;
        form.cuisine_type = self.cuisine_type;
        form.opening_hours = self.opening_hours;
        form.rating = self.rating;
    }
}

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "Result<RestaurantRecord, DiscoveryError>")]
pub struct SubmitRegistration;

#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "RegistrationSnapshot")]
pub struct GetRegistrationState;

/////////////////////////////////////////////////////////////////////
// Mensajes hacia UIHandler
/////////////////////////////////////////////////////////////////////

/// A line typed by the user.
///
/// ## Returns
/// `false` once the user asked to quit.
#[derive(Message, Debug, Clone)]
#[rtype(result = "bool")]
pub struct UserInput(pub String);

use crate::session::SessionContext;
use actix::prelude::*;
use colored::Color;
use common::constants::PICKED_COORDINATE_DECIMALS;
use common::errors::{DiscoveryError, StoreError, ValidationError};
use common::logger::Logger;
use common::messages::InsertRestaurant;
use common::types::coordinate::{Coordinate, parse_degrees};
use common::types::restaurant_info::{NewRestaurant, Rating, RestaurantRecord};
use serde::{Deserialize, Serialize};

/// The registration form as typed by the owner. Every field is raw text
/// except the star rating, where 0 means "not rated".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub description: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub phone: String,
    pub cuisine_type: String,
    pub opening_hours: String,
    pub rating: u8,
}

impl RegistrationForm {
    /// Fills latitude/longitude from a map click.
    pub fn pick_location(&mut self, position: Coordinate) {
        let decimals = PICKED_COORDINATE_DECIMALS;
        let picked = position.rounded(decimals);
        self.latitude = format!("{:.*}", decimals, picked.latitude());
        self.longitude = format!("{:.*}", decimals, picked.longitude());
    }

    /// Checks the required fields and builds the insert row for `owner_id`.
    pub fn validate(&self, owner_id: &str) -> Result<NewRestaurant, ValidationError> {
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;
        let address = required("address", &self.address)?;
        let latitude = parse_degrees("latitude", &self.latitude)?;
        let longitude = parse_degrees("longitude", &self.longitude)?;
        let position = Coordinate::new(latitude, longitude)?;
        let rating = Rating::from_form(self.rating)?;

        Ok(NewRestaurant {
            name,
            description: Some(description),
            address,
            position,
            owner_id: owner_id.to_string(),
            phone: optional(&self.phone),
            cuisine_type: optional(&self.cuisine_type),
            opening_hours: optional(&self.opening_hours),
            rating,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Sends validated registrations to the record store.
#[derive(Clone)]
pub struct Registrar {
    store: Recipient<InsertRestaurant>,
    logger: Logger,
}

impl Registrar {
    pub fn new(store: Recipient<InsertRestaurant>) -> Self {
        Self {
            store,
            logger: Logger::new("Registrar", Color::Magenta),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Registers the restaurant described by `form` under the signed-in identity.
    ///
    /// Checks run before any store call: identity first, then the form.
    /// A store failure leaves the table unchanged and is returned as is.
    pub async fn register(
        &self,
        session: &SessionContext,
        form: &RegistrationForm,
    ) -> Result<RestaurantRecord, DiscoveryError> {
        let identity = session.require_identity()?;
        if !session.is_owner() {
            self.logger.warn(format!(
                "User {} registers a restaurant without the owner role hint",
                identity.id
            ));
        }
        let restaurant = form.validate(&identity.id)?;

        let result = self
            .store
            .send(InsertRestaurant { restaurant })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
            .and_then(|response| response);

        match result {
            Ok(record) => {
                self.logger.info(format!(
                    "Restaurant {} registered with id {}",
                    record.name, record.id
                ));
                Ok(record)
            }
            Err(e) => {
                self.logger.error(format!("Error registering restaurant: {}", e));
                Err(DiscoveryError::StoreUnavailable(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;
    use common::types::session::{Identity, UserRole};

    fn filled_form() -> RegistrationForm {
        RegistrationForm {
            name: "  La Parolaccia ".to_string(),
            description: "Trattoria".to_string(),
            address: "Riobamba 1046".to_string(),
            latitude: "-34.5967".to_string(),
            longitude: "-58.3932".to_string(),
            phone: "".to_string(),
            cuisine_type: "Italiana".to_string(),
            opening_hours: "   ".to_string(),
            rating: 0,
        }
    }

    fn owner_session() -> SessionContext {
        SessionContext::new(
            Some(Identity {
                id: "owner-9".to_string(),
            }),
            Some(UserRole::RestaurantOwner),
        )
    }

    #[test]
    fn test_validate_builds_row() {
        let row = filled_form().validate("owner-9").unwrap();
        assert_eq!(row.name, "La Parolaccia");
        assert_eq!(row.owner_id, "owner-9");
        assert_eq!(row.phone, None);
        assert_eq!(row.opening_hours, None);
        assert_eq!(row.cuisine_type.as_deref(), Some("Italiana"));
        assert_eq!(row.rating, None);
        assert_eq!(row.position, Coordinate::new(-34.5967, -58.3932).unwrap());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let cases: [(&str, fn(&mut RegistrationForm)); 5] = [
            ("name", |f| f.name.clear()),
            ("description", |f| f.description = " ".into()),
            ("address", |f| f.address.clear()),
            ("latitude", |f| f.latitude.clear()),
            ("longitude", |f| f.longitude.clear()),
        ];
        for (field, blank) in cases {
            let mut form = filled_form();
            blank(&mut form);
            assert_eq!(form.validate("o"), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn test_bad_numbers_and_ratings() {
        let mut form = filled_form();
        form.latitude = "north".to_string();
        assert!(matches!(
            form.validate("o"),
            Err(ValidationError::InvalidNumber { field: "latitude", .. })
        ));

        let mut form = filled_form();
        form.latitude = "91".to_string();
        assert_eq!(form.validate("o"), Err(ValidationError::InvalidLatitude(91.0)));

        let mut form = filled_form();
        form.rating = 7;
        assert_eq!(form.validate("o"), Err(ValidationError::InvalidRating(7)));
    }

    #[test]
    fn test_pick_location_keeps_six_decimals() {
        let mut form = RegistrationForm::default();
        form.pick_location(Coordinate::new(-34.603722222, -58.381555555).unwrap());
        assert_eq!(form.latitude, "-34.603722");
        assert_eq!(form.longitude, "-58.381556");
    }

    #[actix_rt::test]
    async fn test_missing_field_never_reaches_store() {
        let store = FakeStore::default();
        let registrar = store.registrar();
        let mut form = filled_form();
        form.address.clear();

        let err = registrar.register(&owner_session(), &form).await.unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::InvalidInput(ValidationError::MissingField("address"))
        );
        assert_eq!(store.insert_calls(), 0);
    }

    #[actix_rt::test]
    async fn test_anonymous_is_rejected_before_store() {
        let store = FakeStore::default();
        let registrar = store.registrar();

        let err = registrar
            .register(&SessionContext::anonymous(), &filled_form())
            .await
            .unwrap_err();
        assert_eq!(err, DiscoveryError::AuthRequired);
        assert_eq!(store.insert_calls(), 0);
    }

    #[actix_rt::test]
    async fn test_successful_registration() {
        let store = FakeStore::default();
        let registrar = store.registrar();

        let record = registrar
            .register(&owner_session(), &filled_form())
            .await
            .unwrap();
        assert_eq!(record.owner_id, "owner-9");
        assert_eq!(store.inserted().len(), 1);
    }

    #[actix_rt::test]
    async fn test_store_failure_is_reported() {
        let store = FakeStore::default().fail_inserts(StoreError::Unavailable("down".into()));
        let registrar = store.registrar();

        let err = registrar
            .register(&owner_session(), &filled_form())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::StoreUnavailable(StoreError::Unavailable("down".into()))
        );
        assert!(store.inserted().is_empty());
    }
}

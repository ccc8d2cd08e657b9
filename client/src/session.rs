use common::config::Config;
use common::errors::DiscoveryError;
use common::types::session::{Identity, UserRole};
use serde::{Deserialize, Serialize};

/// Who is using the app and which capability set the client believes they have.
///
/// The role is a client-side hint kept next to the identity provider's
/// session. Components receive this context explicitly; the role never grants
/// anything by itself, the store must authorize writes on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<Identity>,
    role: Option<UserRole>,
}

/// What gets persisted next to the provider session token.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRoleHint {
    user_id: String,
    role: UserRole,
}

impl SessionContext {
    pub fn new(identity: Option<Identity>, role: Option<UserRole>) -> Self {
        Self { identity, role }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for the configured user. `MAP_USER_ROLE` wins; without it the
    /// hint stored by a previous run is used.
    pub fn resume(config: &Config, stored_hint: Option<&str>) -> Self {
        let identity = config.user_id.clone().map(|id| Identity { id });
        let restored = Self::restore(identity, stored_hint);
        match config.user_role {
            Some(role) if restored.identity.is_some() => Self::new(restored.identity, Some(role)),
            _ => restored,
        }
    }

    /// Rebuilds the session from the provider's current user and the stored hint.
    /// A hint that cannot be read, or that belongs to another user, is dropped.
    pub fn restore(identity: Option<Identity>, stored_hint: Option<&str>) -> Self {
        let role = match (&identity, stored_hint) {
            (Some(identity), Some(raw)) => serde_json::from_str::<StoredRoleHint>(raw)
                .ok()
                .filter(|hint| hint.user_id == identity.id)
                .map(|hint| hint.role),
            _ => None,
        };
        Self::new(identity, role)
    }

    /// Serialized role hint, `None` when there is nothing to remember.
    pub fn stored_hint(&self) -> Option<String> {
        let identity = self.identity.as_ref()?;
        let role = self.role?;
        serde_json::to_string(&StoredRoleHint {
            user_id: identity.id.clone(),
            role,
        })
        .ok()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn is_owner(&self) -> bool {
        self.role == Some(UserRole::RestaurantOwner)
    }

    /// The identity, or [`DiscoveryError::AuthRequired`] when nobody is signed in.
    pub fn require_identity(&self) -> Result<&Identity, DiscoveryError> {
        self.identity.as_ref().ok_or(DiscoveryError::AuthRequired)
    }
}

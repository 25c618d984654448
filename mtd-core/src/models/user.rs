use serde::{Deserialize, Serialize};

/// The identity of whoever is logged in for this session.
///
/// Never persisted; a new session starts logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    /// Unique Taxpayer Reference.
    pub utr: String,
    pub vat_registered: bool,
}

/// Source of a [`User`] for the login action.
pub trait IdentityProvider: Send + Sync {
    fn login(&self) -> User;
}

/// Stand-in for the Government Gateway sign-in. Always returns the same
/// VAT-registered business identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub const LOGIN_MESSAGE: &'static str = "Logged in with Government Gateway (simulated).";
}

impl IdentityProvider for SimulatedGateway {
    fn login(&self) -> User {
        User {
            id: "12345".to_string(),
            name: "Business User".to_string(),
            utr: "1234567890".to_string(),
            vat_registered: true,
        }
    }
}

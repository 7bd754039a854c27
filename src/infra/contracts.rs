use crate::{
    domain::actor::Actor,
    infra::{config::AppConfig, error::AppError},
};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError>;
}

/// Supplies the local actor. Read-only to the chat core.
pub trait IdentityProvider {
    fn current_actor(&self) -> Actor;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub label: String,
}

/// Resolves product references to display labels.
pub trait ListingProvider {
    fn describe(&self, product_ref: &str) -> Option<Listing>;
}

use crate::{
    domain::actor::{Actor, Role},
    infra::{config::IdentityConfig, contracts::IdentityProvider},
};

/// Identity taken from the `[identity]` config section, with an optional role override.
#[derive(Debug, Clone)]
pub struct ConfigIdentityProvider {
    config: IdentityConfig,
    role_override: Option<Role>,
}

impl ConfigIdentityProvider {
    pub fn new(config: IdentityConfig, role_override: Option<Role>) -> Self {
        Self {
            config,
            role_override,
        }
    }
}

impl IdentityProvider for ConfigIdentityProvider {
    fn current_actor(&self) -> Actor {
        Actor {
            id: self.config.id.clone(),
            display_name: self.config.display_name.clone(),
            role: self.role_override.unwrap_or(self.config.role),
        }
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{domain::actor::Role, infra::error::AppError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub identity: IdentityConfig,
    pub simulator: SimulatorConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.simulator.validate()?;
        self.ui.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file for the terminal UI. Falls back to the state directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityConfig {
    pub id: String,
    pub display_name: String,
    pub role: Role,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            id: "local-user".to_owned(),
            display_name: "You".to_owned(),
            role: Role::Buyer,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub delivered_after_ms: u64,
    pub read_after_ms: u64,
    pub typing_after_min_ms: u64,
    pub typing_after_max_ms: u64,
    pub response_after_min_ms: u64,
    pub response_after_max_ms: u64,
    /// Fixed seed for reproducible replies; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            delivered_after_ms: 1_000,
            read_after_ms: 2_000,
            typing_after_min_ms: 150,
            typing_after_max_ms: 600,
            response_after_min_ms: 1_500,
            response_after_max_ms: 3_500,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.delivered_after_ms >= self.read_after_ms {
            return Err(AppError::invalid_config(
                "simulator.read_after_ms",
                format!(
                    "must be greater than delivered_after_ms ({})",
                    self.delivered_after_ms
                ),
            ));
        }

        if self.typing_after_min_ms > self.typing_after_max_ms {
            return Err(AppError::invalid_config(
                "simulator.typing_after_min_ms",
                "must not exceed typing_after_max_ms",
            ));
        }

        if self.response_after_min_ms > self.response_after_max_ms {
            return Err(AppError::invalid_config(
                "simulator.response_after_min_ms",
                "must not exceed response_after_max_ms",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// How often the terminal host polls input and fires due timers.
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

impl UiConfig {
    fn validate(&self) -> Result<(), AppError> {
        if self.tick_ms == 0 {
            return Err(AppError::invalid_config("ui.tick_ms", "must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_read_before_delivered() {
        let mut config = AppConfig::default();
        config.simulator.read_after_ms = config.simulator.delivered_after_ms;

        let error = config.validate().expect_err("must reject");

        assert!(matches!(
            error,
            AppError::InvalidConfig {
                field: "simulator.read_after_ms",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_response_window() {
        let mut config = AppConfig::default();
        config.simulator.response_after_min_ms = 5_000;

        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_tick() {
        let mut config = AppConfig::default();
        config.ui.tick_ms = 0;

        assert!(config.validate().is_err());
    }
}

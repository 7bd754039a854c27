use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    domain::actor::Role,
    infra::config::{AppConfig, IdentityConfig, LogConfig, SimulatorConfig, UiConfig},
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub identity: Option<FileIdentityConfig>,
    pub simulator: Option<FileSimulatorConfig>,
    pub ui: Option<FileUiConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(identity) = self.identity {
            identity.merge_into(&mut config.identity);
        }

        if let Some(simulator) = self.simulator {
            simulator.merge_into(&mut config.simulator);
        }

        if let Some(ui) = self.ui {
            ui.merge_into(&mut config.ui);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileIdentityConfig {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Role>,
}

impl FileIdentityConfig {
    fn merge_into(self, config: &mut IdentityConfig) {
        if let Some(id) = self.id {
            config.id = id;
        }

        if let Some(display_name) = self.display_name {
            config.display_name = display_name;
        }

        if let Some(role) = self.role {
            config.role = role;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileSimulatorConfig {
    pub delivered_after_ms: Option<u64>,
    pub read_after_ms: Option<u64>,
    pub typing_after_min_ms: Option<u64>,
    pub typing_after_max_ms: Option<u64>,
    pub response_after_min_ms: Option<u64>,
    pub response_after_max_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl FileSimulatorConfig {
    fn merge_into(self, config: &mut SimulatorConfig) {
        let fields = [
            (self.delivered_after_ms, &mut config.delivered_after_ms),
            (self.read_after_ms, &mut config.read_after_ms),
            (self.typing_after_min_ms, &mut config.typing_after_min_ms),
            (self.typing_after_max_ms, &mut config.typing_after_max_ms),
            (self.response_after_min_ms, &mut config.response_after_min_ms),
            (self.response_after_max_ms, &mut config.response_after_max_ms),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileUiConfig {
    pub tick_ms: Option<u64>,
}

impl FileUiConfig {
    fn merge_into(self, config: &mut UiConfig) {
        if let Some(tick_ms) = self.tick_ms {
            config.tick_ms = tick_ms;
        }
    }
}

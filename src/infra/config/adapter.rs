use std::path::{Path, PathBuf};

use crate::infra::{
    config::{load, AppConfig},
    contracts::ConfigAdapter,
    error::AppError,
};

/// Loads config from a TOML file, falling back to defaults when it is absent.
#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        load(self.path.as_deref())
    }
}

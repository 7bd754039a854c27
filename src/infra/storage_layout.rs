use std::{fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "souk";
const LOG_FILE_NAME: &str = "souk.log";

/// Per-user directories the app writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub state_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let base = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "the log directory (state/data dir)".into(),
            })?;

        Ok(Self::under(base))
    }

    pub fn under(base: PathBuf) -> Self {
        Self {
            state_dir: base.join(APP_DIR_NAME),
        }
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.state_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.state_dir.clone(),
            source,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join(LOG_FILE_NAME)
    }
}

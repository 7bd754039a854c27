use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infra::{config::LogConfig, error::AppError, storage_layout::StorageLayout};

/// Where log lines go for the current command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The terminal UI owns stdout, so logs go to a file.
    File,
    Stderr,
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init(config: &LogConfig, sink: LogSink) -> Result<Option<WorkerGuard>, AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match sink {
        LogSink::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(AppError::LoggingInit)?;
            Ok(None)
        }
        LogSink::File => {
            let path = match &config.file {
                Some(path) => path.clone(),
                None => {
                    let layout = StorageLayout::resolve()?;
                    layout.ensure_dirs()?;
                    layout.log_file()
                }
            };
            let file = open_log_file(&path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(AppError::LoggingInit)?;
            Ok(Some(guard))
        }
    }
}

fn open_log_file(path: &Path) -> Result<fs::File, AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::StorageDirCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::LoggingInit(Box::new(source)))
}

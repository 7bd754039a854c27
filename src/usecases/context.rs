use tracing_appender::non_blocking::WorkerGuard;

use crate::{domain::actor::Actor, infra::config::AppConfig};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub actor: Actor,
    /// Flushes file logging on drop.
    log_guard: Option<WorkerGuard>,
}

impl AppContext {
    pub fn new(config: AppConfig, actor: Actor) -> Self {
        Self {
            config,
            actor,
            log_guard: None,
        }
    }

    pub fn with_log_guard(mut self, guard: Option<WorkerGuard>) -> Self {
        self.log_guard = guard;
        self
    }
}

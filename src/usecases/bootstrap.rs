use std::path::Path;

use rand::rngs::StdRng;

use crate::{
    domain::{actor::Role, error::ChatError},
    infra::{
        self,
        config::{FileConfigAdapter, SimulatorConfig},
        contracts::{ConfigAdapter, IdentityProvider, ListingProvider},
        error::AppError,
        identity::ConfigIdentityProvider,
        logging::LogSink,
    },
    ui::CrosstermEventSource,
    usecases::{
        chat_session::ChatSession,
        context::AppContext,
        contracts::{AppEventSource, ShellOrchestrator},
        random::RngSource,
        response_simulator::SimulatorTimings,
        shell::DefaultShellOrchestrator,
        timers::{Clock, SystemClock},
    },
};

pub type LiveSession = ChatSession<SystemClock, RngSource<StdRng>>;

pub struct ShellComposition {
    pub event_source: Box<dyn AppEventSource>,
    pub orchestrator: Box<dyn ShellOrchestrator>,
}

pub fn bootstrap(
    config_path: Option<&Path>,
    role_override: Option<Role>,
    log_sink: LogSink,
) -> Result<AppContext, AppError> {
    let context = build_context(config_path, role_override)?;
    let guard = infra::logging::init(&context.config.logging, log_sink)?;

    tracing::debug!(
        actor_id = %context.actor.id,
        role = %context.actor.role,
        "session context ready"
    );

    Ok(context.with_log_guard(guard))
}

fn build_context(
    config_path: Option<&Path>,
    role_override: Option<Role>,
) -> Result<AppContext, AppError> {
    let config_adapter = FileConfigAdapter::new(config_path);
    let config = config_adapter.load()?;
    let identity = ConfigIdentityProvider::new(config.identity.clone(), role_override);
    let actor = identity.current_actor();

    Ok(AppContext::new(config, actor))
}

/// Starts a live session over the demo inbox.
pub fn start_session(
    context: &AppContext,
    listings: &dyn ListingProvider,
) -> Result<LiveSession, ChatError> {
    let clock = SystemClock;
    let inbox = infra::demo_data::demo_inbox(&context.actor, listings, clock.now())?;

    Ok(ChatSession::new(
        context.actor.clone(),
        inbox,
        SimulatorTimings::from(&context.config.simulator),
        clock,
        RngSource::from_seed(context.config.simulator.seed),
    ))
}

pub fn compose_shell(context: &AppContext, session: LiveSession) -> ShellComposition {
    ShellComposition {
        event_source: Box::new(CrosstermEventSource::new(context.config.ui.tick_ms)),
        orchestrator: Box::new(DefaultShellOrchestrator::new(session)),
    }
}

impl From<&SimulatorConfig> for SimulatorTimings {
    fn from(config: &SimulatorConfig) -> Self {
        Self {
            delivered_after_ms: config.delivered_after_ms,
            read_after_ms: config.read_after_ms,
            typing_after_min_ms: config.typing_after_min_ms,
            typing_after_max_ms: config.typing_after_max_ms,
            response_after_min_ms: config.response_after_min_ms,
            response_after_max_ms: config.response_after_max_ms,
        }
    }
}

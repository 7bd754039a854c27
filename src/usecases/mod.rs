//! Use case layer: application workflows and orchestration.

pub mod bootstrap;
pub mod change_feed;
pub mod chat_session;
pub mod context;
pub mod contracts;
pub mod list_conversations;
pub mod random;
pub mod response_simulator;
pub mod send_message;
pub mod shell;
pub mod timers;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}

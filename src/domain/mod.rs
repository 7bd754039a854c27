//! Domain layer: conversations, messages and the rules that govern them.

pub mod actor;
pub mod composer_state;
pub mod conversation;
pub mod conversation_list_state;
pub mod conversation_store;
pub mod day_groups;
pub mod detail_view;
pub mod error;
pub mod events;
pub mod message;
pub mod navigation;
pub mod shell_state;
pub mod summary;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}

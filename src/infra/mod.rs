//! Infrastructure layer: adapters for config, identity, listings, logging and storage.

pub mod catalog;
pub mod config;
pub mod contracts;
pub mod demo_data;
pub mod error;
pub mod identity;
pub mod logging;
pub mod storage_layout;
#[cfg(test)]
pub mod stubs;

/// Returns the infra module name for smoke checks.
pub fn module_name() -> &'static str {
    "infra"
}

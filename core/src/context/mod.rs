//! Caller-supplied context for one match: configuration and trigger geometry.

mod config;
mod error;
mod triggers;

pub use config::SessionConfig;
pub use error::ConfigError;
pub use triggers::{NoTriggers, StaticTriggers, TriggerLookup};

//! Bot configuration: types, TOML loading and validation.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BotConfig, ChainDescriptor, ConfigError};

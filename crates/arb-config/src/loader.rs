//! TOML configuration loading.

use crate::types::{BotConfig, ConfigError};
use std::path::{Path, PathBuf};

/// Loads and validates a [`BotConfig`] from a TOML file.
pub struct ConfigLoader {
	path: Option<PathBuf>,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self { path: None }
	}

	pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
		self.path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn load(self) -> Result<BotConfig, ConfigError> {
		let path = self.path.ok_or_else(|| {
			ConfigError::ValidationError("no config file path provided".to_string())
		})?;
		if !path.exists() {
			return Err(ConfigError::FileNotFound(path.display().to_string()));
		}
		let raw = std::fs::read_to_string(&path)?;
		Self::parse(&raw)
	}

	/// Parse and validate config from raw TOML text.
	pub fn parse(raw: &str) -> Result<BotConfig, ConfigError> {
		let config: BotConfig =
			toml::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

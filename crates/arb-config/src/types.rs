//! Configuration types for the bot.

use alloy::primitives::Address;
use arb_types::TokenDetails;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Config file not found: {0}")]
	FileNotFound(String),
	#[error("Config parse error: {0}")]
	ParseError(String),
	#[error("Config validation error: {0}")]
	ValidationError(String),
	#[error("IO error reading config: {0}")]
	IoError(#[from] std::io::Error),
}

/// The chain the bot runs against.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainDescriptor {
	pub id: u64,
	pub name: String,
	/// The wrapped native gas asset, the common unit for profit math.
	pub wrapped_native: TokenDetails,
	/// Block explorer base URL for transaction links.
	pub explorer_url: Option<String>,
}

impl ChainDescriptor {
	pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
		self.explorer_url
			.as_ref()
			.map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
	}
}

/// Complete bot configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
	/// RPC endpoints, tried in order as a fallback list.
	pub rpc_urls: Vec<String>,
	pub chain: ChainDescriptor,
	/// The arb contract executing clears.
	pub arb_address: Address,
	/// Percentage of the estimated gas cost the fill must cover before
	/// submission. The string "0" disables profit/gas accounting.
	#[serde(default = "default_gas_coverage")]
	pub gas_coverage_percentage: String,
	/// Binary-search iteration budget per opportunity probe.
	#[serde(default = "default_hops")]
	pub hops: u32,
	/// Concurrent bundling strategies probed per pair, 1..=3.
	#[serde(default = "default_retries")]
	pub retries: usize,
	/// Bound on pool-discovery fetches, milliseconds.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Fund order fills from the signer wallet instead of the arb
	/// contract's own balance.
	#[serde(default)]
	pub self_fund_orders: bool,
	/// Shuffle pair processing order each round.
	#[serde(default)]
	pub shuffle: bool,
	/// Pools never considered for routing.
	#[serde(default)]
	pub pool_blacklist: Vec<Address>,
}

fn default_gas_coverage() -> String {
	"100".to_string()
}

fn default_hops() -> u32 {
	7
}

fn default_retries() -> usize {
	1
}

fn default_timeout_ms() -> u64 {
	10_000
}

impl BotConfig {
	/// Parsed gas coverage percentage. Zero disables the second
	/// (guarded) gas estimation pass.
	pub fn gas_coverage(&self) -> Result<u64, ConfigError> {
		self.gas_coverage_percentage.parse::<u64>().map_err(|_| {
			ConfigError::ValidationError(format!(
				"gas_coverage_percentage must be an integer percentage, got {:?}",
				self.gas_coverage_percentage
			))
		})
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.rpc_urls.is_empty() {
			return Err(ConfigError::ValidationError(
				"at least one RPC URL is required".to_string(),
			));
		}
		for url in &self.rpc_urls {
			if !url.starts_with("http://") && !url.starts_with("https://") {
				return Err(ConfigError::ValidationError(format!(
					"RPC URL must start with http:// or https://, got {:?}",
					url
				)));
			}
		}
		if self.hops == 0 {
			return Err(ConfigError::ValidationError(
				"hops must be at least 1".to_string(),
			));
		}
		if !(1..=3).contains(&self.retries) {
			return Err(ConfigError::ValidationError(format!(
				"retries must be between 1 and 3, got {}",
				self.retries
			)));
		}
		self.gas_coverage()?;
		Ok(())
	}
}

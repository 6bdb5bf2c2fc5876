//! Chain client interface and its Alloy-backed implementation.
//!
//! The bot consumes the chain through this narrow surface: gas price and
//! block number reads, gas estimation, submission and receipt waits. The
//! receipt is wrapped in a thin local type so the rest of the pipeline
//! (and its tests) never touch provider-specific structures.

mod alloy_client;
mod types;

pub use alloy_client::AlloyChainClient;
pub use types::{Receipt, ReceiptLog};

use alloy::primitives::B256;
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ChainError {
	#[error("RPC error: {0}")]
	Rpc(String),
	#[error("Gas estimation failed: {0}")]
	Estimation(String),
	#[error("Submission failed: {0}")]
	Submission(String),
}

impl ChainError {
	pub fn message(&self) -> &str {
		match self {
			ChainError::Rpc(m) | ChainError::Estimation(m) | ChainError::Submission(m) => m,
		}
	}

	/// Whether this error means the signer cannot pay for gas at all.
	/// Message sniffing, because that is all live RPCs give us.
	pub fn is_insufficient_funds(&self) -> bool {
		let msg = self.message().to_lowercase();
		msg.contains("insufficient funds")
			|| msg.contains("insufficient balance")
			|| msg.contains("exceeds the balance of the account")
			|| msg.contains("gas required exceeds allowance")
	}
}

/// Receipt wait failure. Carries whatever partial receipt was observed
/// before the failure so callers can still do best-effort gas accounting.
#[derive(Debug, Clone, Error)]
#[error("receipt wait failed: {message}")]
pub struct WaitError {
	pub message: String,
	pub partial: Option<Receipt>,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
	async fn get_gas_price(&self) -> Result<u128, ChainError>;
	async fn get_block_number(&self) -> Result<u64, ChainError>;
	async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainError>;
	async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainError>;
	async fn wait_for_receipt(&self, tx_hash: B256) -> Result<Receipt, WaitError>;
}

/// Shortened hash for log lines.
pub fn truncate_hash(hash: &B256) -> String {
	let hash_str = hex::encode(hash.0);
	format!("{}..", &hash_str[..8])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classifies_insufficient_funds() {
		let err = ChainError::Estimation(
			"err: Insufficient funds for gas * price + value".to_string(),
		);
		assert!(err.is_insufficient_funds());

		let err = ChainError::Estimation("execution reverted: MinimalOutput".to_string());
		assert!(!err.is_insufficient_funds());

		let err = ChainError::Rpc("gas required exceeds allowance (0)".to_string());
		assert!(err.is_insufficient_funds());
	}

	#[test]
	fn truncates_hashes_for_display() {
		let hash = B256::repeat_byte(0xab);
		assert_eq!(truncate_hash(&hash), "abababab..");
	}
}

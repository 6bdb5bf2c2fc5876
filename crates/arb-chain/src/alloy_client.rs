//! Alloy-backed [`ChainClient`] implementation.

use crate::{truncate_hash, ChainClient, ChainError, Receipt, ReceiptLog, WaitError};
use alloy::primitives::B256;
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Chain client over any Alloy provider. The provider's wallet handles
/// signing on submission.
pub struct AlloyChainClient<P> {
	provider: P,
	/// Poll interval while waiting for a receipt.
	poll_interval: Duration,
	/// Overall bound on one receipt wait.
	receipt_timeout: Duration,
}

impl<P> AlloyChainClient<P> {
	pub fn new(provider: P) -> Self {
		Self {
			provider,
			poll_interval: Duration::from_secs(4),
			receipt_timeout: Duration::from_secs(120),
		}
	}

	pub fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
		self.receipt_timeout = timeout;
		self
	}
}

fn convert_receipt(receipt: TransactionReceipt) -> Receipt {
	let logs = receipt
		.inner
		.logs()
		.iter()
		.map(|log| ReceiptLog {
			address: log.inner.address,
			topics: log.inner.data.topics().to_vec(),
			data: log.inner.data.data.clone(),
		})
		.collect();
	Receipt {
		tx_hash: receipt.transaction_hash,
		block_number: receipt.block_number,
		success: receipt.status(),
		gas_used: receipt.gas_used,
		effective_gas_price: receipt.effective_gas_price,
		logs,
	}
}

#[async_trait]
impl<P: Provider + Send + Sync> ChainClient for AlloyChainClient<P> {
	async fn get_gas_price(&self) -> Result<u128, ChainError> {
		self.provider
			.get_gas_price()
			.await
			.map_err(|e| ChainError::Rpc(format!("failed to get gas price: {}", e)))
	}

	async fn get_block_number(&self) -> Result<u64, ChainError> {
		self.provider
			.get_block_number()
			.await
			.map_err(|e| ChainError::Rpc(format!("failed to get block number: {}", e)))
	}

	async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, ChainError> {
		self.provider
			.estimate_gas(tx.clone())
			.await
			.map_err(|e| ChainError::Estimation(e.to_string()))
	}

	async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainError> {
		let pending = self
			.provider
			.send_transaction(tx)
			.await
			.map_err(|e| ChainError::Submission(e.to_string()))?;
		let tx_hash = *pending.tx_hash();
		info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");
		Ok(tx_hash)
	}

	async fn wait_for_receipt(&self, tx_hash: B256) -> Result<Receipt, WaitError> {
		let start = tokio::time::Instant::now();
		let mut partial: Option<Receipt> = None;

		loop {
			if start.elapsed() > self.receipt_timeout {
				return Err(WaitError {
					message: format!(
						"timeout waiting for receipt of {} after {}s",
						truncate_hash(&tx_hash),
						self.receipt_timeout.as_secs()
					),
					partial,
				});
			}

			match self.provider.get_transaction_receipt(tx_hash).await {
				Ok(Some(receipt)) => {
					let receipt = convert_receipt(receipt);
					if receipt.block_number.is_some() {
						return Ok(receipt);
					}
					// Seen but not yet included; keep it for best-effort
					// accounting if the wait ultimately fails.
					partial = Some(receipt);
				}
				Ok(None) => {
					debug!(tx_hash = %truncate_hash(&tx_hash), "Receipt not available yet");
				}
				Err(e) => {
					return Err(WaitError {
						message: format!("failed to get receipt: {}", e),
						partial,
					});
				}
			}

			tokio::time::sleep(self.poll_interval).await;
		}
	}
}

//! Thin receipt types decoupled from the provider library.

use alloy::primitives::{Address, Bytes, B256, U256};

/// One log entry of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLog {
	pub address: Address,
	pub topics: Vec<B256>,
	pub data: Bytes,
}

/// A mined transaction receipt, reduced to what settlement accounting
/// needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
	pub tx_hash: B256,
	pub block_number: Option<u64>,
	pub success: bool,
	pub gas_used: u64,
	pub effective_gas_price: u128,
	pub logs: Vec<ReceiptLog>,
}

impl Receipt {
	/// `effectiveGasPrice * gasUsed`, in native gas token wei.
	pub fn gas_cost(&self) -> U256 {
		U256::from(self.effective_gas_price) * U256::from(self.gas_used)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gas_cost_is_price_times_used() {
		let receipt = Receipt {
			tx_hash: B256::ZERO,
			block_number: Some(1),
			success: true,
			gas_used: 21_000,
			effective_gas_price: 30_000_000_000,
			logs: vec![],
		};
		assert_eq!(
			receipt.gas_cost(),
			U256::from(21_000u64) * U256::from(30_000_000_000u64)
		);
	}
}

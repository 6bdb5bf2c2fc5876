//! Receipt log interpretation.
//!
//! After a clear transaction mines, the financial outcome is read back out
//! of its logs: ERC-20 `Transfer` events filtered by recipient give the
//! signer's token incomes, transfers into the orderbook give the cleared
//! amount, and for same-orderbook fills the orderbook's own `AfterClear`
//! event carries the cleared output directly.

use alloy::primitives::LogData;
use alloy::sol;
use alloy::sol_types::SolEvent;
use arb_chain::{Receipt, ReceiptLog};
use arb_types::{Address, U256};

sol! {
	event Transfer(address indexed from, address indexed to, uint256 value);

	struct ClearStateChange {
		uint256 aliceOutput;
		uint256 bobOutput;
		uint256 aliceInput;
		uint256 bobInput;
	}

	event AfterClear(address sender, ClearStateChange clearStateChange);
}

fn to_log_data(log: &ReceiptLog) -> LogData {
	LogData::new_unchecked(log.topics.clone(), log.data.clone())
}

fn decode_transfer(log: &ReceiptLog) -> Option<Transfer> {
	if log.topics.first() != Some(&Transfer::SIGNATURE_HASH) {
		return None;
	}
	Transfer::decode_log_data(&to_log_data(log)).ok()
}

/// Sum of `token` amounts transferred to `recipient` in this receipt,
/// self-transfers excluded. `None` when the token never paid out.
pub fn token_income(receipt: &Receipt, recipient: Address, token: Address) -> Option<U256> {
	let mut income: Option<U256> = None;
	for log in receipt.logs.iter().filter(|log| log.address == token) {
		if let Some(transfer) = decode_transfer(log) {
			if transfer.to == recipient && transfer.from != recipient {
				income = Some(income.unwrap_or(U256::ZERO) + transfer.value);
			}
		}
	}
	income
}

/// The amount actually cleared from the order's vault.
///
/// Same-orderbook fills emit `AfterClear`; otherwise the first transfer
/// into the orderbook is the taker's payment for the cleared output.
pub fn actual_clear_amount(receipt: &Receipt, orderbook: Address) -> Option<U256> {
	for log in receipt.logs.iter().filter(|log| log.address == orderbook) {
		if log.topics.first() == Some(&AfterClear::SIGNATURE_HASH) {
			if let Ok(event) = AfterClear::decode_log_data(&to_log_data(log)) {
				return Some(event.clearStateChange.aliceOutput);
			}
		}
	}
	receipt.logs.iter().find_map(|log| {
		decode_transfer(log).and_then(|transfer| {
			(transfer.to == orderbook).then_some(transfer.value)
		})
	})
}

#[cfg(test)]
pub(crate) fn transfer_log(token: Address, from: Address, to: Address, value: U256) -> ReceiptLog {
	let data = Transfer { from, to, value }.encode_log_data();
	ReceiptLog {
		address: token,
		topics: data.topics().to_vec(),
		data: data.data,
	}
}

#[cfg(test)]
pub(crate) fn after_clear_log(orderbook: Address, sender: Address, alice_output: U256) -> ReceiptLog {
	let data = AfterClear {
		sender,
		clearStateChange: ClearStateChange {
			aliceOutput: alice_output,
			bobOutput: U256::ZERO,
			aliceInput: U256::ZERO,
			bobInput: U256::ZERO,
		},
	}
	.encode_log_data();
	ReceiptLog {
		address: orderbook,
		topics: data.topics().to_vec(),
		data: data.data,
	}
}

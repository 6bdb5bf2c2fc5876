//! Signer accounts and round-robin rotation.
//!
//! An account's balance is tracked optimistically: it is decremented by
//! each receipt's gas cost instead of being re-queried from the chain, so
//! it may drift. It is advisory input to wallet-fund classification only.
//! Exclusive ownership during a pair's turn (the `&mut` handed out by the
//! rotation) is what keeps the single-writer invariant.

use alloy::primitives::{Address, U256};

/// A signer wallet with its locally tracked balance and the bounty tokens
/// it has accumulated for later sweeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
	pub address: Address,
	pub balance: U256,
	pub bounty_tokens: Vec<Address>,
}

impl Account {
	pub fn new(address: Address, balance: U256) -> Self {
		Self {
			address,
			balance,
			bounty_tokens: Vec::new(),
		}
	}

	/// Settle a mined transaction against this account: deduct the gas
	/// cost and register newly seen bounty tokens, each at most once.
	pub fn apply_receipt(&mut self, gas_cost: U256, bounties: impl IntoIterator<Item = Address>) {
		self.balance = self.balance.saturating_sub(gas_cost);
		for token in bounties {
			if !self.bounty_tokens.contains(&token) {
				self.bounty_tokens.push(token);
			}
		}
	}
}

/// Round-robin rotation over the signer pool. Handing out `&mut` makes
/// concurrent use of the same account unrepresentable.
#[derive(Debug)]
pub struct RoundRobin {
	accounts: Vec<Account>,
	next: usize,
}

impl RoundRobin {
	pub fn new(accounts: Vec<Account>) -> Self {
		assert!(!accounts.is_empty(), "at least one signer account is required");
		Self { accounts, next: 0 }
	}

	/// The account whose turn it is; advances the rotation.
	pub fn next_account(&mut self) -> &mut Account {
		let idx = self.next;
		self.next = (self.next + 1) % self.accounts.len();
		&mut self.accounts[idx]
	}

	pub fn accounts(&self) -> &[Account] {
		&self.accounts
	}
}

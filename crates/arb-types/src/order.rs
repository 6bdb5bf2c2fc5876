//! Limit orders and their quotes.

use crate::math;
use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The evaluable gating condition of an order: interpreter, store and the
/// compiled expression bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluable {
	pub interpreter: Address,
	pub store: Address,
	pub bytecode: Bytes,
}

/// A valid input or output slot of an order: the token, its native
/// decimals and the vault the funds move through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoDescriptor {
	pub token: Address,
	pub decimals: u8,
	pub vault_id: U256,
}

/// An on-chain limit order. Immutable once fetched; identified by its
/// content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	pub owner: Address,
	pub nonce: U256,
	pub evaluable: Evaluable,
	pub valid_inputs: Vec<IoDescriptor>,
	pub valid_outputs: Vec<IoDescriptor>,
	pub order_hash: B256,
}

/// A freshly fetched quote for one take-order.
///
/// Both fields are 18-decimal fixed point. `ratio` is the price of input
/// per unit of output; zero means the order accepts any price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
	pub max_output: U256,
	pub ratio: U256,
}

impl Quote {
	/// Maximum counter-ratio this order will accept from the other side,
	/// i.e. `1/ratio`. Zero ratio means the price is unbounded.
	pub fn max_counter_ratio(&self) -> U256 {
		if self.ratio.is_zero() {
			U256::MAX
		} else {
			math::div_18(math::ONE18, self.ratio)
		}
	}
}

/// One take-order entry of a bundle: the source order plus which of its
/// input/output slots this pair trades, and the per-round quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeOrder {
	pub order: Arc<Order>,
	pub input_io_index: u8,
	pub output_io_index: u8,
	pub quote: Option<Quote>,
}

impl TakeOrder {
	pub fn id(&self) -> B256 {
		self.order.order_hash
	}
}

/// Where the counterparty liquidity for a candidate fill comes from.
///
/// Replaces the ad hoc `opposingOrders`/`marketPrice` argument pair with a
/// closed set so profit estimation is exhaustive over its cases.
#[derive(Debug, Clone)]
pub enum CounterpartySource {
	/// External AMM liquidity at the given 18-fixed-point market price.
	Market { price: U256 },
	/// Opposing take-orders from another orderbook, ratio-ascending.
	InterOrderbook { orders: Vec<TakeOrder> },
	/// A single opposing order within the same orderbook.
	IntraOrderbook { quote: Quote },
}

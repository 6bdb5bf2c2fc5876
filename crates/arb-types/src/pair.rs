//! Bundled order groups and the single-order pair object.

use crate::order::TakeOrder;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A token as the bot sees it: address, native decimals and display symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
	pub address: Address,
	pub decimals: u8,
	pub symbol: String,
}

/// Orders of one orderbook grouped by (buy token, sell token) pair.
///
/// The take-order sequence is quoted per round; entries whose quote comes
/// back with zero max output are dropped before processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundledOrders {
	pub orderbook: Address,
	pub buy_token: TokenDetails,
	pub sell_token: TokenDetails,
	pub take_orders: Vec<TakeOrder>,
}

impl BundledOrders {
	/// "BUY/SELL" display pair, the key used for the per-round pool cache.
	pub fn pair_key(&self) -> String {
		format!("{}/{}", self.buy_token.symbol, self.sell_token.symbol)
	}

	/// Same key with the sides flipped; the pool cache is checked both ways.
	pub fn reverse_pair_key(&self) -> String {
		format!("{}/{}", self.sell_token.symbol, self.buy_token.symbol)
	}

	/// Split a bundle into single-order pair objects, preserving order.
	pub fn into_pairs(self) -> Vec<OrderPairObject> {
		self.take_orders
			.iter()
			.cloned()
			.map(|take_order| OrderPairObject {
				orderbook: self.orderbook,
				buy_token: self.buy_token.clone(),
				sell_token: self.sell_token.clone(),
				take_order,
			})
			.collect()
	}
}

/// The unit of work for the pair processor: one pair, exactly one
/// take-order. Orders are processed one at a time even when bundled for
/// quoting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPairObject {
	pub orderbook: Address,
	pub buy_token: TokenDetails,
	pub sell_token: TokenDetails,
	pub take_order: TakeOrder,
}

impl OrderPairObject {
	pub fn pair_key(&self) -> String {
		format!("{}/{}", self.buy_token.symbol, self.sell_token.symbol)
	}

	pub fn reverse_pair_key(&self) -> String {
		format!("{}/{}", self.sell_token.symbol, self.buy_token.symbol)
	}
}

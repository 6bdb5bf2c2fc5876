//! Arb contract encoding seam.
//!
//! ABI encoding and contract bindings are an external collaborator; the
//! pipeline only needs calldata for a take-orders fill with a chosen
//! bundling strategy and minimum-profit guard.

use alloy::primitives::{Address, Bytes, U256};
use arb_liquidity::Route;
use arb_types::{BundlingStrategy, OrderPairObject};

pub trait ArbContract: Send + Sync {
	/// The arb contract's on-chain address, the `to` of every fill.
	fn address(&self) -> Address;

	/// Encode a fill of `maximum_input` (taker-side, native sell-token
	/// decimals) of the pair's take-order, duplicated per `strategy`,
	/// routed through `route`, reverting unless at least
	/// `minimum_profit` (buy-token units) is left over. `self_fund`
	/// selects the wallet-funded entrypoint.
	fn encode_take_orders(
		&self,
		pair: &OrderPairObject,
		strategy: BundlingStrategy,
		maximum_input: U256,
		minimum_profit: U256,
		route: &Route,
		self_fund: bool,
	) -> Bytes;
}

//! Liquidity source interface.
//!
//! The bot treats AMM routing as an external pathfinding oracle: it asks
//! for pools to be fetched, takes a pool map and asks for the best route
//! for a given input amount. The routing math behind `find_best_route` is
//! not part of this system.

use alloy::primitives::{Address, U256};
use arb_types::TokenDetails;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LiquidityError {
	#[error("Pool fetch failed: {0}")]
	Fetch(String),
	#[error("Pool fetch timed out after {0:?}")]
	Timeout(Duration),
}

/// One pool usable for routing between a token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
	pub address: Address,
	pub dex: String,
	pub token0: Address,
	pub token1: Address,
}

/// The routable pool graph for one token pair.
#[derive(Debug, Clone, Default)]
pub struct PoolMap {
	pub pools: Vec<Pool>,
}

/// One leg of an execution route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLeg {
	pub token_in: String,
	pub token_out: String,
	pub pool: Address,
	pub dex: String,
	/// Share of the input routed through this leg, basis points.
	pub share_bps: u16,
}

/// A resolved execution route and its expected output, in the output
/// token's native decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
	pub amount_out: U256,
	pub legs: Vec<RouteLeg>,
}

/// Outcome of route resolution. `NoWay` means the pool graph offers no
/// path at all for the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult {
	Route(Route),
	NoWay,
}

#[async_trait]
pub trait LiquiditySource: Send + Sync {
	/// Refresh pool data for a pair, bounded by `timeout`.
	async fn fetch_pools(
		&self,
		token_a: &TokenDetails,
		token_b: &TokenDetails,
		blacklist: &[Address],
		timeout: Duration,
		block_number: Option<u64>,
	) -> Result<(), LiquidityError>;

	/// The currently known routable pool graph for a pair.
	async fn pool_map(&self, token_a: &TokenDetails, token_b: &TokenDetails) -> PoolMap;

	/// Best execution route for `amount_in` (native decimals of `from`)
	/// through the given pool map.
	async fn find_best_route(
		&self,
		pool_map: &PoolMap,
		from: &TokenDetails,
		to: &TokenDetails,
		amount_in: U256,
		gas_price: u128,
	) -> RouteResult;
}

/// Render a route as one line per leg, for span attributes and logs.
pub fn visualize(route: &Route) -> Vec<String> {
	route
		.legs
		.iter()
		.map(|leg| {
			format!(
				"{} {}.{:02}% -> {} ({} {})",
				leg.token_in,
				leg.share_bps / 100,
				leg.share_bps % 100,
				leg.token_out,
				leg.dex,
				leg.pool,
			)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn visualizes_route_legs() {
		let route = Route {
			amount_out: U256::from(1000),
			legs: vec![RouteLeg {
				token_in: "WETH".to_string(),
				token_out: "USDC".to_string(),
				pool: Address::repeat_byte(0x11),
				dex: "UniswapV3".to_string(),
				share_bps: 10_000,
			}],
		};
		let lines = visualize(&route);
		assert_eq!(lines.len(), 1);
		assert!(lines[0].starts_with("WETH 100.00% -> USDC (UniswapV3"));
	}
}

//! Multi-mode opportunity search.
//!
//! Runs the binary search concurrently once per bundling strategy and
//! joins on all of them. Selection is deterministic regardless of
//! completion order: the fulfilled result with the largest fill wins.

use crate::dryrun::EthPrices;
use crate::find_opp::find_opp;
use crate::BotEnv;
use arb_liquidity::PoolMap;
use arb_types::{
	Address, BundlingStrategy, DryrunFailure, DryrunSuccess, FailureReason, OrderPairObject, U256,
};
use futures::future::join_all;
use tracing::debug;

/// Probe every configured bundling strategy concurrently and pick the
/// best fulfilled result. Failure precedence when nothing fulfills:
/// wallet-fund problems dominate, then missing routes, then plain
/// no-opportunity with the first rejection's diagnostics.
pub async fn find_opp_with_retries(
	env: &BotEnv,
	pair: &OrderPairObject,
	pool_map: &PoolMap,
	signer: Address,
	vault_balance: U256,
	gas_price: u128,
	prices: &EthPrices,
) -> Result<DryrunSuccess, DryrunFailure> {
	let strategies = BundlingStrategy::first_n(env.config.retries);
	let searches = strategies.iter().map(|strategy| {
		find_opp(
			env,
			*strategy,
			pair,
			pool_map,
			signer,
			vault_balance,
			gas_price,
			prices,
		)
	});
	let results = join_all(searches).await;

	let mut best: Option<DryrunSuccess> = None;
	let mut failures: Vec<DryrunFailure> = Vec::new();
	for result in results {
		match result {
			Ok(success) => {
				let better = best
					.as_ref()
					.map(|b| success.maximum_input > b.maximum_input)
					.unwrap_or(true);
				if better {
					best = Some(success);
				}
			}
			Err(failure) => failures.push(failure),
		}
	}

	if let Some(success) = best {
		debug!(
			pair = %pair.pair_key(),
			max_input = %success.maximum_input,
			"Opportunity found"
		);
		return Ok(success);
	}

	if let Some(broke) = failures
		.iter()
		.position(|f| f.reason == FailureReason::NoWalletFund)
	{
		return Err(failures.swap_remove(broke));
	}
	if let Some(no_route) = failures
		.iter()
		.position(|f| f.reason == FailureReason::NoRoute)
	{
		return Err(failures.swap_remove(no_route));
	}
	let first = failures
		.drain(..)
		.next()
		.unwrap_or_else(|| DryrunFailure::new(FailureReason::NoOpportunity));
	Err(DryrunFailure::with_attributes(
		FailureReason::NoOpportunity,
		first.span_attributes,
	))
}

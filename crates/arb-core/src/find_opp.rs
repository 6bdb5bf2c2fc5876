//! Fixed-depth binary search for the largest provably fillable amount.
//!
//! This is a coarse bisection, not a convergence-guaranteed search: the
//! hop budget bounds RPC round trips per candidate pair, and whatever the
//! last hop says is the answer. It trades optimality for a bounded number
//! of network calls.

use crate::dryrun::{DryrunProber, EthPrices};
use crate::BotEnv;
use arb_liquidity::PoolMap;
use arb_types::{
	Address, BundlingStrategy, DryrunFailure, DryrunSuccess, FailureReason, OrderPairObject,
	SpanAttributes, U256,
};
use tracing::debug;

/// Search for the largest fillable input within the configured hop
/// budget, starting from the full vault balance (18-decimal fixed point).
#[allow(clippy::too_many_arguments)]
pub async fn find_opp(
	env: &BotEnv,
	strategy: BundlingStrategy,
	pair: &OrderPairObject,
	pool_map: &PoolMap,
	signer: Address,
	vault_balance: U256,
	gas_price: u128,
	prices: &EthPrices,
) -> Result<DryrunSuccess, DryrunFailure> {
	let prober = DryrunProber::new(env);
	let hops = env.config.hops.max(1);

	let mut maximum_input = vault_balance;
	let mut attrs = SpanAttributes::new();
	let mut all_no_route = true;

	for hop in 1..=hops {
		match prober
			.dryrun(
				strategy,
				pair,
				pool_map,
				signer,
				maximum_input,
				gas_price,
				prices,
			)
			.await
		{
			Ok(success) => {
				// Full-balance success, or search exhausted with success.
				if hop == 1 || hop == hops {
					return Ok(success);
				}
				// Provably fillable at this size; try larger.
				maximum_input =
					vault_balance.min(maximum_input.saturating_add(vault_balance >> hop));
			}
			Err(failure) => {
				if failure.reason == FailureReason::NoWalletFund {
					// A structural blocker; refining the size is pointless.
					attrs.extend(failure.span_attributes);
					return Err(DryrunFailure::with_attributes(
						FailureReason::NoWalletFund,
						attrs,
					));
				}
				if failure.reason != FailureReason::NoRoute {
					all_no_route = false;
				}
				// First hop keeps the full diagnostic including the raw
				// error; later hops drop it to bound the payload.
				if hop == 1 {
					attrs.extend(failure.span_attributes);
				} else {
					let mut hop_attrs = failure.span_attributes;
					hop_attrs.remove("error");
					attrs.extend_prefixed(&format!("hop.{}", hop), hop_attrs);
				}
				if hop == hops {
					break;
				}
				maximum_input = maximum_input.saturating_sub(vault_balance >> hop);
			}
		}
	}

	let reason = if all_no_route {
		FailureReason::NoRoute
	} else {
		FailureReason::NoOpportunity
	};
	debug!(pair = %pair.pair_key(), strategy = %strategy, %reason, "Opportunity search exhausted");
	Err(DryrunFailure::with_attributes(reason, attrs))
}

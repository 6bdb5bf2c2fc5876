//! The batch orchestrator.
//!
//! Processes every bundled order pair sequentially with round-robin
//! account rotation. Sequential on purpose: it bounds RPC load and keeps
//! nonce handling trivial, and the single-writer account invariant falls
//! out of it for free. A pair failure never aborts the batch.

use crate::account::RoundRobin;
use crate::pair::process_pair;
use crate::BotEnv;
use arb_types::{
	BundledOrders, HaltReason, PairHalt, ProcessPairReport, ProcessPairStatus, RoundReport,
	SpanAttributes, U256,
};
use futures::FutureExt;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info};

/// Run one full processing round over `bundles`. Returns a report per
/// attempted pair, in processing order, plus the updated running average
/// gas cost seeded from `prev_avg_gas_cost`.
pub async fn process_round(
	env: &BotEnv,
	bundles: Vec<BundledOrders>,
	accounts: &mut RoundRobin,
	prev_avg_gas_cost: Option<U256>,
) -> RoundReport {
	let mut pairs: Vec<_> = bundles
		.into_iter()
		.flat_map(BundledOrders::into_pairs)
		.collect();
	if env.config.shuffle {
		pairs.shuffle(&mut rand::thread_rng());
	}
	info!(pairs = pairs.len(), "Starting processing round");

	let mut seen_pairs = HashSet::new();
	let mut results = Vec::with_capacity(pairs.len());
	let mut avg_gas_cost = prev_avg_gas_cost;

	for pair in pairs {
		let pair_key = pair.pair_key();
		let buy_symbol = pair.buy_token.symbol.clone();
		let sell_symbol = pair.sell_token.symbol.clone();
		let signer = accounts.next_account();

		let result = AssertUnwindSafe(process_pair(env, pair, signer, &mut seen_pairs))
			.catch_unwind()
			.await
			.unwrap_or_else(|panic| {
				Err(PairHalt {
					reason: HaltReason::UnexpectedError,
					error: Some(panic_message(panic)),
					report: ProcessPairReport::new(
						ProcessPairStatus::NoOpportunity,
						&buy_symbol,
						&sell_symbol,
					),
					span_attributes: SpanAttributes::new(),
				})
			});

		let gas_cost = match &result {
			Ok(report) => report.actual_gas_cost,
			Err(halt) => halt.report.actual_gas_cost,
		};
		if let Some(cost) = gas_cost {
			avg_gas_cost = Some(match avg_gas_cost {
				Some(avg) => (avg + cost) / U256::from(2),
				None => cost,
			});
		}

		match &result {
			Ok(report) => debug!(pair = %pair_key, status = ?report.status, "Pair processed"),
			Err(halt) if halt.reason.is_operational_fault() => {
				error!(
					pair = %pair_key,
					reason = %halt.reason,
					error = ?halt.error,
					"Pair processing halted"
				);
			}
			Err(halt) => debug!(pair = %pair_key, reason = %halt.reason, "Pair processing halted"),
		}
		results.push(result);
	}

	RoundReport {
		results,
		avg_gas_cost,
	}
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
	if let Some(msg) = panic.downcast_ref::<&str>() {
		(*msg).to_string()
	} else if let Some(msg) = panic.downcast_ref::<String>() {
		msg.clone()
	} else {
		"unknown panic".to_string()
	}
}

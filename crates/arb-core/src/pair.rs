//! The pair processor: quote, price, search, submit, settle.
//!
//! A linear state machine with early exits. Infrastructure failures
//! become structured halts for the caller to classify; a fruitless search
//! is a normal terminal report, not an error. No unhandled failure leaves
//! this function.

use crate::account::Account;
use crate::dryrun::EthPrices;
use crate::retrier::find_opp_with_retries;
use crate::settlement::{actual_clear_amount, token_income};
use crate::BotEnv;
use arb_chain::Receipt;
use arb_liquidity::RouteResult;
use arb_quote::quote_single_with_fallback;
use arb_types::math::{mul_18, scale_18, scale_from_18, ONE18};
use arb_types::{
	HaltReason, OrderPairObject, PairHalt, ProcessPairReport, ProcessPairStatus, SpanAttributes,
	TokenDetails, U256,
};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// Process one order pair end to end. `seen_pairs` is the per-round pool
/// cache; `signer` is exclusively owned for the duration of the call.
pub async fn process_pair(
	env: &BotEnv,
	mut pair: OrderPairObject,
	signer: &mut Account,
	seen_pairs: &mut HashSet<String>,
) -> Result<ProcessPairReport, PairHalt> {
	// 1. quote, across the RPC fallback list
	let quote = match quote_single_with_fallback(
		env.quoter.as_ref(),
		pair.orderbook,
		&pair.take_order,
		&env.config.rpc_urls,
		None,
	)
	.await
	{
		Ok(quote) => quote,
		Err(e) => {
			return Err(PairHalt {
				reason: HaltReason::FailedToQuote,
				error: Some(env.scrubber.scrub_err(&e)),
				report: report_for(&pair, ProcessPairStatus::NoOpportunity),
				span_attributes: SpanAttributes::new(),
			});
		}
	};
	if quote.max_output.is_zero() {
		debug!(pair = %pair.pair_key(), "Zero max output, nothing to clear");
		return Ok(report_for(&pair, ProcessPairStatus::ZeroOutput));
	}
	pair.take_order.quote = Some(quote);

	// 2. gas price
	let gas_price = match env.chain.get_gas_price().await {
		Ok(gas_price) => gas_price,
		Err(e) => {
			return Err(PairHalt {
				reason: HaltReason::FailedToGetGasPrice,
				error: Some(env.scrubber.scrub_err(&e)),
				report: report_for(&pair, ProcessPairStatus::NoOpportunity),
				span_attributes: SpanAttributes::new(),
			});
		}
	};

	// 3. pool discovery, once per pair per round, either direction
	if !seen_pairs.contains(&pair.pair_key()) && !seen_pairs.contains(&pair.reverse_pair_key()) {
		let fetched = env
			.liquidity
			.fetch_pools(
				&pair.sell_token,
				&pair.buy_token,
				&env.config.pool_blacklist,
				Duration::from_millis(env.config.timeout_ms),
				None,
			)
			.await;
		if let Err(e) = fetched {
			return Err(PairHalt {
				reason: HaltReason::FailedToGetPools,
				error: Some(env.scrubber.scrub_err(&e)),
				report: report_for(&pair, ProcessPairStatus::NoOpportunity),
				span_attributes: SpanAttributes::new(),
			});
		}
		seen_pairs.insert(pair.pair_key());
	}
	let pool_map = env.liquidity.pool_map(&pair.sell_token, &pair.buy_token).await;

	// 4. reference prices against the native asset
	let gas_coverage = env.config.gas_coverage().unwrap_or(0);
	let input_to_eth = eth_price(env, &pair.buy_token, gas_price).await;
	let output_to_eth = eth_price(env, &pair.sell_token, gas_price).await;
	let prices = match (input_to_eth, output_to_eth) {
		(Some(input_to_eth), Some(output_to_eth)) => EthPrices {
			input_to_eth,
			output_to_eth,
		},
		// With gas accounting off a missing price is tolerable.
		_ if gas_coverage == 0 => EthPrices::default(),
		_ => {
			let mut attrs = SpanAttributes::new();
			attrs.set("inputToEthPrice", input_to_eth.map(|p| p.to_string()));
			attrs.set("outputToEthPrice", output_to_eth.map(|p| p.to_string()));
			// Routine for thinly traded tokens, not an operational fault.
			debug!(pair = %pair.pair_key(), "No native price for pair tokens");
			return Err(PairHalt {
				reason: HaltReason::FailedToGetEthPrice,
				error: None,
				report: report_for(&pair, ProcessPairStatus::NoOpportunity),
				span_attributes: attrs,
			});
		}
	};

	// 5. opportunity search; coming up empty is the normal outcome
	let found = match find_opp_with_retries(
		env,
		&pair,
		&pool_map,
		signer.address,
		quote.max_output,
		gas_price,
		&prices,
	)
	.await
	{
		Ok(found) => found,
		Err(failure) => {
			debug!(
				pair = %pair.pair_key(),
				reason = %failure.reason,
				"No opportunity for pair"
			);
			return Ok(report_for(&pair, ProcessPairStatus::NoOpportunity));
		}
	};

	// 6. submission
	let mut report = report_for(&pair, ProcessPairStatus::FoundOpportunity);
	let tx_hash = match env.submitter().send_transaction(found.raw_tx.clone()).await {
		Ok(tx_hash) => tx_hash,
		Err(e) => {
			// The raw transaction may not be recoverable from the error,
			// so it goes into the diagnostics wholesale.
			let mut attrs = found.span_attributes.clone();
			attrs.set(
				"rawTx",
				serde_json::to_string(&found.raw_tx).unwrap_or_default(),
			);
			return Err(PairHalt {
				reason: HaltReason::TxFailed,
				error: Some(env.scrubber.scrub_err(&e)),
				report,
				span_attributes: attrs,
			});
		}
	};
	report.tx_url = env.config.chain.tx_url(&tx_hash.to_string());
	info!(
		pair = %pair.pair_key(),
		tx = %tx_hash,
		max_input = %found.maximum_input,
		"Clear transaction submitted"
	);

	// 7. receipt and settlement
	match env.chain.wait_for_receipt(tx_hash).await {
		Ok(receipt) if receipt.success => {
			settle(&pair, signer, &receipt, &prices, &mut report);
			Ok(report)
		}
		Ok(receipt) => {
			// Reverted: the gas is spent regardless.
			let gas_cost = receipt.gas_cost();
			signer.apply_receipt(gas_cost, []);
			report.actual_gas_cost = Some(gas_cost);
			Err(PairHalt {
				reason: HaltReason::TxMineFailed,
				error: Some("transaction reverted on chain".to_string()),
				report,
				span_attributes: found.span_attributes,
			})
		}
		Err(wait_err) => {
			// Best effort: account for gas from whatever partial receipt
			// the wait produced.
			if let Some(partial) = &wait_err.partial {
				let gas_cost = partial.gas_cost();
				signer.apply_receipt(gas_cost, []);
				report.actual_gas_cost = Some(gas_cost);
			}
			Err(PairHalt {
				reason: HaltReason::TxMineFailed,
				error: Some(env.scrubber.scrub(&wait_err.message)),
				report,
				span_attributes: found.span_attributes,
			})
		}
	}
}

fn report_for(pair: &OrderPairObject, status: ProcessPairStatus) -> ProcessPairReport {
	ProcessPairReport::new(status, &pair.buy_token.symbol, &pair.sell_token.symbol)
}

/// Price of one unit of `token` in the native asset, via the liquidity
/// source. `None` when no route to the wrapped native exists.
async fn eth_price(env: &BotEnv, token: &TokenDetails, gas_price: u128) -> Option<U256> {
	let wnative = &env.config.chain.wrapped_native;
	if token.address == wnative.address {
		return Some(ONE18);
	}
	let pool_map = env.liquidity.pool_map(token, wnative).await;
	let one_unit = scale_from_18(ONE18, token.decimals);
	match env
		.liquidity
		.find_best_route(&pool_map, token, wnative, one_unit, gas_price)
		.await
	{
		RouteResult::Route(route) => Some(scale_18(route.amount_out, wnative.decimals)),
		RouteResult::NoWay => None,
	}
}

/// Settle a successful clear against the signer and fill in the report's
/// financial detail.
fn settle(
	pair: &OrderPairObject,
	signer: &mut Account,
	receipt: &Receipt,
	prices: &EthPrices,
	report: &mut ProcessPairReport,
) {
	let gas_cost = receipt.gas_cost();
	report.actual_gas_cost = Some(gas_cost);
	report.cleared_amount = actual_clear_amount(receipt, pair.orderbook);
	report.cleared_orders = vec![pair.take_order.id()];

	let input_income = token_income(receipt, signer.address, pair.buy_token.address);
	let output_income = token_income(receipt, signer.address, pair.sell_token.address);
	report.input_token_income = input_income;
	report.output_token_income = output_income;

	let income_eth = mul_18(
		scale_18(input_income.unwrap_or_default(), pair.buy_token.decimals),
		prices.input_to_eth,
	) + mul_18(
		scale_18(output_income.unwrap_or_default(), pair.sell_token.decimals),
		prices.output_to_eth,
	);
	report.net_profit = Some(income_eth.saturating_sub(gas_cost));

	let bounties = [
		(input_income, pair.buy_token.address),
		(output_income, pair.sell_token.address),
	]
	.into_iter()
	.filter_map(|(income, token)| income.map(|_| token));
	signer.apply_receipt(gas_cost, bounties);

	info!(
		pair = %pair.pair_key(),
		net_profit = ?report.net_profit,
		gas_cost = %gas_cost,
		"Clear settled"
	);
}

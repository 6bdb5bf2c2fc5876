//! The dryrun prober: a gas-estimation-only trial of a candidate fill.
//!
//! A dryrun never submits anything. It resolves a route, builds the fill
//! transaction for the chosen bundling strategy and asks the chain to
//! estimate gas for it; estimation doubles as on-chain validation of the
//! fill. A success carries the fully prepared transaction with its gas
//! limit already set.

use crate::BotEnv;
use alloy::primitives::TxKind;
use alloy::rpc::types::TransactionInput;
use arb_chain::ChainError;
use arb_liquidity::{visualize, PoolMap, Route, RouteResult};
use arb_types::math::{div_18, mul_18, scale_18, scale_from_18};
use arb_types::{
	Address, BundlingStrategy, CounterpartySource, DryrunFailure, DryrunSuccess, FailureReason,
	OrderPairObject, SpanAttributes, TransactionRequest, U256,
};
use tracing::debug;

/// Token prices against the native gas asset, 18-decimal fixed point.
/// Zero prices mean profit/gas accounting is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthPrices {
	/// Price of the pair's buy (order input) token in eth.
	pub input_to_eth: U256,
	/// Price of the pair's sell (order output) token in eth.
	pub output_to_eth: U256,
}

/// Headroom applied to the minimum-profit gas guard, percent.
const GUARD_HEADROOM_PCT: u64 = 105;
/// Headroom applied to the final gas limit, percent.
const GAS_LIMIT_HEADROOM_PCT: u64 = 103;

pub struct DryrunProber<'a> {
	env: &'a BotEnv,
}

impl<'a> DryrunProber<'a> {
	pub fn new(env: &'a BotEnv) -> Self {
		Self { env }
	}

	/// Probe one candidate fill size. `maximum_input` is 18-decimal fixed
	/// point of the pair's sell token.
	pub async fn dryrun(
		&self,
		strategy: BundlingStrategy,
		pair: &OrderPairObject,
		pool_map: &PoolMap,
		signer: Address,
		maximum_input: U256,
		gas_price: u128,
		prices: &EthPrices,
	) -> Result<DryrunSuccess, DryrunFailure> {
		let mut attrs = SpanAttributes::new();
		attrs.set("maxInput", maximum_input.to_string());

		let amount_in = scale_from_18(maximum_input, pair.sell_token.decimals);

		// 1. route resolution
		let route = match self
			.env
			.liquidity
			.find_best_route(
				pool_map,
				&pair.sell_token,
				&pair.buy_token,
				amount_in,
				gas_price,
			)
			.await
		{
			RouteResult::Route(route) => route,
			RouteResult::NoWay => {
				attrs.set("route", "no-way");
				return Err(DryrunFailure::with_attributes(FailureReason::NoRoute, attrs));
			}
		};

		let route_visual = visualize(&route);
		attrs.set("route", serde_json::Value::from(route_visual.clone()));

		// 2. implied market price for this fill size
		let amount_out_18 = scale_18(route.amount_out, pair.buy_token.decimals);
		let price = div_18(amount_out_18, maximum_input);
		attrs.set("amountOut", amount_out_18.to_string());
		attrs.set("marketPrice", price.to_string());

		// 3. estimation with a zero minimum-profit guard
		let tx = self.build_tx(pair, strategy, amount_in, U256::ZERO, &route, signer, gas_price);
		let mut gas_estimate = match self.env.chain.estimate_gas(&tx).await {
			Ok(estimate) => estimate,
			Err(e) => return Err(self.estimation_failure(e, attrs)),
		};

		// 4. re-estimate with the actual gas guard, when accounting is on
		let gas_coverage = self.env.config.gas_coverage().unwrap_or(0);
		let mut final_tx = tx;
		if gas_coverage != 0 {
			let gas_cost = U256::from(gas_price) * U256::from(gas_estimate);
			let guard = mul_18(gas_cost, prices.input_to_eth) * U256::from(gas_coverage)
				/ U256::from(100) * U256::from(GUARD_HEADROOM_PCT)
				/ U256::from(100);
			attrs.set("gasGuard", guard.to_string());

			let guarded_tx =
				self.build_tx(pair, strategy, amount_in, guard, &route, signer, gas_price);
			gas_estimate = match self.env.chain.estimate_gas(&guarded_tx).await {
				Ok(estimate) => estimate,
				Err(e) => return Err(self.estimation_failure(e, attrs)),
			};
			final_tx = guarded_tx;
		}

		// 5. success; gas limit gets headroom over the estimate
		let block_number = match self.env.chain.get_block_number().await {
			Ok(n) => n,
			Err(e) => return Err(self.estimation_failure(e, attrs)),
		};
		final_tx.gas =
			Some((u128::from(gas_estimate) * u128::from(GAS_LIMIT_HEADROOM_PCT)).div_ceil(100)
				as u64);

		let estimated_profit = crate::profit::estimate_profit(
			pair,
			prices.input_to_eth,
			prices.output_to_eth,
			&CounterpartySource::Market { price },
			maximum_input,
		);
		attrs.set("estimatedProfit", estimated_profit.to_string());
		debug!(
			pair = %pair.pair_key(),
			strategy = %strategy,
			max_input = %maximum_input,
			"Dryrun succeeded"
		);

		Ok(DryrunSuccess {
			raw_tx: final_tx,
			maximum_input,
			price,
			route_visual,
			block_number,
			estimated_profit,
			span_attributes: attrs,
		})
	}

	fn build_tx(
		&self,
		pair: &OrderPairObject,
		strategy: BundlingStrategy,
		amount_in: U256,
		minimum_profit: U256,
		route: &Route,
		signer: Address,
		gas_price: u128,
	) -> TransactionRequest {
		let calldata = self.env.contract.encode_take_orders(
			pair,
			strategy,
			amount_in,
			minimum_profit,
			route,
			self.env.config.self_fund_orders,
		);
		let mut tx = TransactionRequest::default();
		tx.from = Some(signer);
		tx.to = Some(TxKind::Call(self.env.contract.address()));
		tx.input = TransactionInput::new(calldata);
		tx.gas_price = Some(gas_price);
		tx
	}

	/// Classify a failed estimation: fund exhaustion short-circuits the
	/// search; everything else is just not an opportunity.
	fn estimation_failure(&self, error: ChainError, mut attrs: SpanAttributes) -> DryrunFailure {
		attrs.set("error", self.env.scrubber.scrub_err(&error));
		let reason = if error.is_insufficient_funds() {
			FailureReason::NoWalletFund
		} else {
			FailureReason::NoOpportunity
		};
		DryrunFailure::with_attributes(reason, attrs)
	}
}

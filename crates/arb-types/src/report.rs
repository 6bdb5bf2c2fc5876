//! Processing results: dryrun successes, per-pair reports and the round
//! aggregate.

use crate::failure::PairHalt;
use crate::span::SpanAttributes;
use alloy::primitives::{B256, U256};
use alloy::rpc::types::TransactionRequest;
use serde::Serialize;

/// A provably fillable opportunity, ready for submission.
///
/// `raw_tx` is never produced without gas having been successfully
/// estimated for it; its gas limit is already set to 103% of the estimate.
#[derive(Debug, Clone, Serialize)]
pub struct DryrunSuccess {
	pub raw_tx: TransactionRequest,
	/// Fill size this transaction takes, 18-decimal fixed point.
	pub maximum_input: U256,
	/// Implied market price for the fill, 18-decimal fixed point.
	pub price: U256,
	/// Human-readable route legs, for diagnostics.
	pub route_visual: Vec<String>,
	/// Block number read at gas-estimation time.
	pub block_number: u64,
	/// Expected profit in the native gas token, 18-decimal fixed point.
	pub estimated_profit: U256,
	pub span_attributes: SpanAttributes,
}

/// Terminal business outcome of processing one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessPairStatus {
	/// The order quoted a zero max output; nothing to do.
	ZeroOutput,
	/// Scanned and found nothing fillable. The common case.
	NoOpportunity,
	/// An opportunity was found and a clearing transaction submitted.
	FoundOpportunity,
}

/// The report unit emitted for every attempted pair. The caller decides
/// persistence; the bot only returns these.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessPairReport {
	pub status: ProcessPairStatus,
	pub buy_token: String,
	pub sell_token: String,
	pub tx_url: Option<String>,
	/// Actual cleared amount extracted from receipt logs, sell-token
	/// native decimals.
	pub cleared_amount: Option<U256>,
	/// `effectiveGasPrice * gasUsed`, native gas token wei.
	pub actual_gas_cost: Option<U256>,
	pub input_token_income: Option<U256>,
	pub output_token_income: Option<U256>,
	/// Income converted to the native token, minus the actual gas cost.
	pub net_profit: Option<U256>,
	pub cleared_orders: Vec<B256>,
}

impl ProcessPairReport {
	pub fn new(status: ProcessPairStatus, buy_token: &str, sell_token: &str) -> Self {
		Self {
			status,
			buy_token: buy_token.to_string(),
			sell_token: sell_token.to_string(),
			tx_url: None,
			cleared_amount: None,
			actual_gas_cost: None,
			input_token_income: None,
			output_token_income: None,
			net_profit: None,
			cleared_orders: Vec::new(),
		}
	}
}

/// Aggregate outcome of one batch round: one entry per attempted pair, in
/// processing order, plus the running average gas cost.
#[derive(Debug)]
pub struct RoundReport {
	pub results: Vec<Result<ProcessPairReport, PairHalt>>,
	/// `(prev_avg + new_cost) / 2` exponential-style update, not a true
	/// mean; consumed by external account-health checks.
	pub avg_gas_cost: Option<U256>,
}

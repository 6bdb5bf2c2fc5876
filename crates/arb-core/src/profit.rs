//! Profit estimation.
//!
//! Pure arithmetic, no I/O. All amounts are 18-decimal fixed point and
//! every division truncates toward zero, matching the on-chain
//! interpreter. Negative intermediate terms floor at zero before price
//! conversion; the dryrun's gas guard is the actual profitability gate.

use arb_types::math::mul_18;
use arb_types::{CounterpartySource, OrderPairObject, Quote, TakeOrder, U256};

/// Expected profit of filling `max_input` of the pair's take-order
/// against the given counterparty, denominated in the native gas token.
pub fn estimate_profit(
	pair: &OrderPairObject,
	input_to_eth_price: U256,
	output_to_eth_price: U256,
	counterparty: &CounterpartySource,
	max_input: U256,
) -> U256 {
	let order_quote = pair.take_order.quote.unwrap_or_default();
	match counterparty {
		CounterpartySource::Market { price } => {
			market_profit(order_quote, *price, input_to_eth_price, max_input)
		}
		CounterpartySource::InterOrderbook { orders } => inter_orderbook_profit(
			order_quote,
			orders,
			input_to_eth_price,
			output_to_eth_price,
			max_input,
		),
		CounterpartySource::IntraOrderbook { quote } => intra_orderbook_profit(
			order_quote,
			*quote,
			input_to_eth_price,
			output_to_eth_price,
		),
	}
}

/// Pure AMM arbitrage: sell `max_input` at the market price, pay the
/// order owner at the order's ratio, convert the margin to eth.
fn market_profit(
	order_quote: Quote,
	market_price: U256,
	input_to_eth_price: U256,
	max_input: U256,
) -> U256 {
	let market_out = mul_18(max_input, market_price);
	let order_input = mul_18(max_input, order_quote.ratio);
	mul_18(market_out.saturating_sub(order_input), input_to_eth_price)
}

/// Fill against an opposing group from another orderbook: walk its
/// take-orders in the given (ratio-ascending) order, greedily matching up
/// to the order's maximum acceptable counter-ratio and the caller's
/// budget.
fn inter_orderbook_profit(
	order_quote: Quote,
	opposing: &[TakeOrder],
	input_to_eth_price: U256,
	output_to_eth_price: U256,
	max_input: U256,
) -> U256 {
	let order_output = max_input;
	let order_input = mul_18(max_input, order_quote.ratio);

	// Zero ratio means a free order: any counter-price, unbounded budget.
	let mut opposing_budget = if order_quote.ratio.is_zero() {
		U256::MAX
	} else {
		mul_18(max_input, order_quote.ratio)
	};
	let max_counter_ratio = order_quote.max_counter_ratio();

	let mut opposing_input = U256::ZERO;
	let mut opposing_output = U256::ZERO;
	for take in opposing {
		if opposing_budget.is_zero() {
			break;
		}
		let quote = take.quote.unwrap_or_default();
		if quote.ratio > max_counter_ratio {
			continue;
		}
		let fill = opposing_budget.min(quote.max_output);
		opposing_output += fill;
		opposing_input += mul_18(fill, quote.ratio);
		opposing_budget -= fill;
	}

	two_term_profit(
		order_output,
		order_input,
		opposing_output,
		opposing_input,
		input_to_eth_price,
		output_to_eth_price,
	)
}

/// Fill against a single opposing order of the same orderbook: each side
/// delivers the lesser of its own max output and what the other side can
/// absorb at its ratio.
fn intra_orderbook_profit(
	order_quote: Quote,
	opposing: Quote,
	input_to_eth_price: U256,
	output_to_eth_price: U256,
) -> U256 {
	let order_output = order_quote
		.max_output
		.min(mul_18(opposing.max_output, opposing.ratio));
	let opposing_output = opposing
		.max_output
		.min(mul_18(order_quote.max_output, order_quote.ratio));
	let order_input = mul_18(order_output, order_quote.ratio);
	let opposing_input = mul_18(opposing_output, opposing.ratio);

	two_term_profit(
		order_output,
		order_input,
		opposing_output,
		opposing_input,
		input_to_eth_price,
		output_to_eth_price,
	)
}

fn two_term_profit(
	order_output: U256,
	order_input: U256,
	opposing_output: U256,
	opposing_input: U256,
	input_to_eth_price: U256,
	output_to_eth_price: U256,
) -> U256 {
	let output_profit = mul_18(
		order_output.saturating_sub(opposing_input),
		output_to_eth_price,
	);
	let input_profit = mul_18(
		opposing_output.saturating_sub(order_input),
		input_to_eth_price,
	);
	output_profit + input_profit
}

#[cfg(test)]
mod tests {
	use super::*;
	use arb_types::math::ONE18;
	use arb_types::{Address, Evaluable, Order, TokenDetails, B256};
	use std::sync::Arc;

	fn fp(units: u64, hundredths: u64) -> U256 {
		ONE18 * U256::from(units) + ONE18 / U256::from(100) * U256::from(hundredths)
	}

	fn take_order(quote: Option<Quote>) -> TakeOrder {
		TakeOrder {
			order: Arc::new(Order {
				owner: Address::ZERO,
				nonce: U256::ZERO,
				evaluable: Evaluable {
					interpreter: Address::ZERO,
					store: Address::ZERO,
					bytecode: Default::default(),
				},
				valid_inputs: vec![],
				valid_outputs: vec![],
				order_hash: B256::ZERO,
			}),
			input_io_index: 0,
			output_io_index: 0,
			quote,
		}
	}

	fn pair_with_ratio(ratio: U256) -> OrderPairObject {
		let token = |symbol: &str| TokenDetails {
			address: Address::ZERO,
			decimals: 18,
			symbol: symbol.to_string(),
		};
		OrderPairObject {
			orderbook: Address::ZERO,
			buy_token: token("BUY"),
			sell_token: token("SELL"),
			take_order: take_order(Some(Quote {
				max_output: fp(100, 0),
				ratio,
			})),
		}
	}

	#[test]
	fn market_profit_is_margin_times_price() {
		// ratio 0.90, market 1.00, 10 units in, eth price 2.0
		let pair = pair_with_ratio(fp(0, 90));
		let profit = estimate_profit(
			&pair,
			fp(2, 0),
			fp(1, 0),
			&CounterpartySource::Market { price: fp(1, 0) },
			fp(10, 0),
		);
		// (10*1.0 - 10*0.9) * 2.0 = 2.0
		assert_eq!(profit, fp(2, 0));
	}

	#[test]
	fn market_profit_floors_negative_margin_at_zero() {
		// order demands more than the market pays
		let pair = pair_with_ratio(fp(1, 10));
		let profit = estimate_profit(
			&pair,
			fp(1, 0),
			fp(1, 0),
			&CounterpartySource::Market { price: fp(1, 0) },
			fp(10, 0),
		);
		assert_eq!(profit, U256::ZERO);
	}

	#[test]
	fn market_profit_is_linear_in_max_input() {
		let pair = pair_with_ratio(fp(0, 50));
		let counterparty = CounterpartySource::Market { price: fp(1, 0) };
		let at = |x: U256| estimate_profit(&pair, fp(1, 0), fp(1, 0), &counterparty, x);
		assert_eq!(at(fp(4, 0)), at(fp(2, 0)) * U256::from(2));
		assert_eq!(at(fp(6, 0)), at(fp(2, 0)) * U256::from(3));
	}

	#[test]
	fn market_profit_monotone_in_margin() {
		let max_input = fp(10, 0);
		let at_ratio = |r: U256| {
			estimate_profit(
				&pair_with_ratio(r),
				fp(1, 0),
				fp(1, 0),
				&CounterpartySource::Market { price: fp(1, 0) },
				max_input,
			)
		};
		// smaller ratio = larger margin = no smaller profit
		assert!(at_ratio(fp(0, 20)) >= at_ratio(fp(0, 60)));
		assert!(at_ratio(fp(0, 60)) >= at_ratio(fp(0, 99)));
	}

	#[test]
	fn inter_orderbook_walks_greedily_within_budget() {
		// order: ratio 1.0, filling 10 units -> budget of 10 opposing units
		let pair = pair_with_ratio(fp(1, 0));
		let opposing = vec![
			take_order(Some(Quote {
				max_output: fp(6, 0),
				ratio: fp(0, 50),
			})),
			take_order(Some(Quote {
				max_output: fp(10, 0),
				ratio: fp(0, 80),
			})),
		];
		let profit = estimate_profit(
			&pair,
			fp(1, 0),
			fp(1, 0),
			&CounterpartySource::InterOrderbook { orders: opposing },
			fp(10, 0),
		);
		// opposing fills: 6 @0.5 then 4 @0.8 -> output 10, input 6.2
		// output term: 10 - 6.2 = 3.8; input term: 10 - 10 = 0
		assert_eq!(profit, fp(3, 80));
	}

	#[test]
	fn inter_orderbook_skips_orders_above_counter_ratio() {
		// order ratio 2.0 -> accepts counter-ratios up to 0.5
		let pair = pair_with_ratio(fp(2, 0));
		let opposing = vec![take_order(Some(Quote {
			max_output: fp(100, 0),
			ratio: fp(0, 60), // too expensive, skipped
		}))];
		let profit = estimate_profit(
			&pair,
			fp(1, 0),
			fp(1, 0),
			&CounterpartySource::InterOrderbook { orders: opposing },
			fp(10, 0),
		);
		// nothing matched: output term 10-0=10, input term 0-20 floors to 0
		assert_eq!(profit, fp(10, 0));
	}

	#[test]
	fn intra_orderbook_takes_minimum_of_both_sides() {
		// order: 100 out @0.5; opposing: 30 out @1.0
		let pair = pair_with_ratio(fp(0, 50));
		let opposing = Quote {
			max_output: fp(30, 0),
			ratio: fp(1, 0),
		};
		let profit = estimate_profit(
			&pair,
			fp(1, 0),
			fp(1, 0),
			&CounterpartySource::IntraOrderbook { quote: opposing },
			U256::ZERO,
		);
		// order delivers min(100, 30*1.0)=30; opposing delivers
		// min(30, 100*0.5)=30; order input 15, opposing input 30
		// output term: 30-30=0; input term: 30-15=15
		assert_eq!(profit, fp(15, 0));
	}
}

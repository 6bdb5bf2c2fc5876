//! Mock collaborators shared by the core's test modules.

use crate::{Account, ArbContract, BotEnv, Scrubber};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use arb_chain::{ChainClient, ChainError, Receipt, WaitError};
use arb_config::{BotConfig, ChainDescriptor};
use arb_liquidity::{
	LiquidityError, LiquiditySource, Pool, PoolMap, Route, RouteLeg, RouteResult,
};
use arb_quote::{QuoteError, QuoteResult, QuoteService};
use arb_types::math::{mul_18, scale_18, scale_from_18};
use arb_types::{
	BundlingStrategy, Evaluable, Order, OrderPairObject, Quote, TakeOrder, TokenDetails,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SIGNER: Address = Address::repeat_byte(0xaa);
pub const ORDERBOOK: Address = Address::repeat_byte(0xbb);
pub const ARB: Address = Address::repeat_byte(0xcc);

pub fn token(symbol: &str, byte: u8, decimals: u8) -> TokenDetails {
	TokenDetails {
		address: Address::repeat_byte(byte),
		decimals,
		symbol: symbol.to_string(),
	}
}

pub fn test_pair(max_output: U256, ratio: U256) -> OrderPairObject {
	OrderPairObject {
		orderbook: ORDERBOOK,
		buy_token: token("BUY", 0x01, 18),
		sell_token: token("SELL", 0x02, 18),
		take_order: TakeOrder {
			order: Arc::new(Order {
				owner: Address::repeat_byte(0x03),
				nonce: U256::ZERO,
				evaluable: Evaluable {
					interpreter: Address::ZERO,
					store: Address::ZERO,
					bytecode: Default::default(),
				},
				valid_inputs: vec![],
				valid_outputs: vec![],
				order_hash: B256::repeat_byte(0x04),
			}),
			input_io_index: 0,
			output_io_index: 0,
			quote: Some(Quote { max_output, ratio }),
		},
	}
}

pub fn test_config() -> BotConfig {
	BotConfig {
		rpc_urls: vec!["http://one.test".to_string(), "http://two.test".to_string()],
		chain: ChainDescriptor {
			id: 137,
			name: "testchain".to_string(),
			wrapped_native: token("WNATIVE", 0x0e, 18),
			explorer_url: Some("https://scan.test".to_string()),
		},
		arb_address: ARB,
		gas_coverage_percentage: "100".to_string(),
		hops: 3,
		retries: 2,
		timeout_ms: 1_000,
		self_fund_orders: false,
		shuffle: false,
		pool_blacklist: vec![],
	}
}

pub fn test_account() -> Account {
	Account::new(SIGNER, U256::from(10).pow(U256::from(18)))
}

/// Liquidity mock: per symbol-pair 18-fp prices; pairs without a price
/// have no route.
pub struct MockLiquidity {
	pub prices: Mutex<HashMap<(String, String), U256>>,
	pub fetch_error: Option<LiquidityError>,
	pub fetch_calls: AtomicUsize,
}

impl MockLiquidity {
	pub fn new() -> Self {
		Self {
			prices: Mutex::new(HashMap::new()),
			fetch_error: None,
			fetch_calls: AtomicUsize::new(0),
		}
	}

	pub fn with_price(self, from: &str, to: &str, price: U256) -> Self {
		self.prices
			.lock()
			.unwrap()
			.insert((from.to_string(), to.to_string()), price);
		self
	}

	pub fn with_fetch_error(mut self, error: LiquidityError) -> Self {
		self.fetch_error = Some(error);
		self
	}
}

#[async_trait]
impl LiquiditySource for MockLiquidity {
	async fn fetch_pools(
		&self,
		_token_a: &TokenDetails,
		_token_b: &TokenDetails,
		_blacklist: &[Address],
		_timeout: Duration,
		_block_number: Option<u64>,
	) -> Result<(), LiquidityError> {
		self.fetch_calls.fetch_add(1, Ordering::SeqCst);
		match &self.fetch_error {
			Some(e) => Err(e.clone()),
			None => Ok(()),
		}
	}

	async fn pool_map(&self, token_a: &TokenDetails, token_b: &TokenDetails) -> PoolMap {
		PoolMap {
			pools: vec![Pool {
				address: Address::repeat_byte(0x55),
				dex: "MockSwap".to_string(),
				token0: token_a.address,
				token1: token_b.address,
			}],
		}
	}

	async fn find_best_route(
		&self,
		_pool_map: &PoolMap,
		from: &TokenDetails,
		to: &TokenDetails,
		amount_in: U256,
		_gas_price: u128,
	) -> RouteResult {
		let prices = self.prices.lock().unwrap();
		match prices.get(&(from.symbol.clone(), to.symbol.clone())) {
			Some(price) => {
				let out_18 = mul_18(scale_18(amount_in, from.decimals), *price);
				RouteResult::Route(Route {
					amount_out: scale_from_18(out_18, to.decimals),
					legs: vec![RouteLeg {
						token_in: from.symbol.clone(),
						token_out: to.symbol.clone(),
						pool: Address::repeat_byte(0x55),
						dex: "MockSwap".to_string(),
						share_bps: 10_000,
					}],
				})
			}
			None => RouteResult::NoWay,
		}
	}
}

/// Chain mock: scripted gas estimations (falling back to a default), a
/// scripted receipt and counters.
pub struct MockChain {
	pub gas_price: u128,
	pub block_number: u64,
	pub estimations: Mutex<VecDeque<Result<u64, ChainError>>>,
	pub default_estimation: Result<u64, ChainError>,
	pub estimate_calls: AtomicUsize,
	pub send_error: Option<ChainError>,
	pub sent: Mutex<Vec<TransactionRequest>>,
	pub receipt: Mutex<Option<Result<Receipt, WaitError>>>,
}

impl MockChain {
	pub fn new() -> Self {
		Self {
			gas_price: 50_000_000_000,
			block_number: 1_000,
			estimations: Mutex::new(VecDeque::new()),
			default_estimation: Ok(200_000),
			estimate_calls: AtomicUsize::new(0),
			send_error: None,
			sent: Mutex::new(Vec::new()),
			receipt: Mutex::new(None),
		}
	}

	pub fn with_estimations(self, results: Vec<Result<u64, ChainError>>) -> Self {
		*self.estimations.lock().unwrap() = results.into();
		self
	}

	pub fn with_default_estimation(mut self, result: Result<u64, ChainError>) -> Self {
		self.default_estimation = result;
		self
	}

	pub fn with_receipt(self, receipt: Result<Receipt, WaitError>) -> Self {
		*self.receipt.lock().unwrap() = Some(receipt);
		self
	}

	pub fn with_send_error(mut self, error: ChainError) -> Self {
		self.send_error = Some(error);
		self
	}
}

#[async_trait]
impl ChainClient for MockChain {
	async fn get_gas_price(&self) -> Result<u128, ChainError> {
		Ok(self.gas_price)
	}

	async fn get_block_number(&self) -> Result<u64, ChainError> {
		Ok(self.block_number)
	}

	async fn estimate_gas(&self, _tx: &TransactionRequest) -> Result<u64, ChainError> {
		self.estimate_calls.fetch_add(1, Ordering::SeqCst);
		self.estimations
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| self.default_estimation.clone())
	}

	async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256, ChainError> {
		if let Some(e) = &self.send_error {
			return Err(e.clone());
		}
		self.sent.lock().unwrap().push(tx);
		Ok(B256::repeat_byte(0x77))
	}

	async fn wait_for_receipt(&self, _tx_hash: B256) -> Result<Receipt, WaitError> {
		self.receipt
			.lock()
			.unwrap()
			.clone()
			.unwrap_or_else(|| {
				Err(WaitError {
					message: "no receipt scripted".to_string(),
					partial: None,
				})
			})
	}
}

/// Quoter mock: scripted per-call outcomes, then a default quote.
pub struct MockQuoter {
	pub outcomes: Mutex<VecDeque<Result<Quote, QuoteError>>>,
	pub default_quote: Option<Quote>,
	pub calls: AtomicUsize,
}

impl MockQuoter {
	pub fn with_quote(quote: Quote) -> Self {
		Self {
			outcomes: Mutex::new(VecDeque::new()),
			default_quote: Some(quote),
			calls: AtomicUsize::new(0),
		}
	}

	pub fn always_failing() -> Self {
		Self {
			outcomes: Mutex::new(VecDeque::new()),
			default_quote: None,
			calls: AtomicUsize::new(0),
		}
	}
}

#[async_trait]
impl QuoteService for MockQuoter {
	async fn quote(
		&self,
		_orderbook: Address,
		orders: &[TakeOrder],
		rpc_url: &str,
		_block_number: Option<u64>,
	) -> Result<Vec<QuoteResult>, QuoteError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(outcome) = self.outcomes.lock().unwrap().pop_front() {
			return outcome.map(|q| orders.iter().map(|_| Ok(q)).collect());
		}
		match self.default_quote {
			Some(quote) => Ok(orders.iter().map(|_| Ok(quote)).collect()),
			None => Err(QuoteError::Rpc(format!("{} refused", rpc_url))),
		}
	}
}

/// Contract mock: calldata's first byte is the bundling copy count, so
/// tests can tell strategies apart on the wire.
pub struct MockContract;

impl ArbContract for MockContract {
	fn address(&self) -> Address {
		ARB
	}

	fn encode_take_orders(
		&self,
		_pair: &OrderPairObject,
		strategy: BundlingStrategy,
		_maximum_input: U256,
		_minimum_profit: U256,
		_route: &Route,
		_self_fund: bool,
	) -> Bytes {
		Bytes::from(vec![strategy.copies() as u8])
	}
}

/// Builder keeping the mocks behind `Arc` so tests can hold onto them
/// and inspect call counts after the environment is built.
pub struct EnvBuilder {
	pub config: BotConfig,
	pub chain: Arc<MockChain>,
	pub liquidity: Arc<MockLiquidity>,
	pub quoter: Arc<MockQuoter>,
}

impl EnvBuilder {
	pub fn new() -> Self {
		Self {
			config: test_config(),
			chain: Arc::new(MockChain::new()),
			liquidity: Arc::new(MockLiquidity::new()),
			quoter: Arc::new(MockQuoter::with_quote(Quote {
				max_output: U256::from(10).pow(U256::from(18)),
				ratio: U256::from(10).pow(U256::from(17)), // 0.1
			})),
		}
	}

	pub fn build(self) -> BotEnv {
		BotEnv {
			config: self.config,
			chain: self.chain,
			submit_chain: None,
			liquidity: self.liquidity,
			quoter: self.quoter,
			contract: Arc::new(MockContract),
			scrubber: Scrubber::new(vec!["supersecret".to_string()]),
		}
	}
}

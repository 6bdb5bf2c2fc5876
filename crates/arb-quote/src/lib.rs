//! Order quoting interface.
//!
//! Quoting is an external collaborator: given take-orders and an RPC
//! endpoint it returns each order's best-case output and price ratio. The
//! bot's only logic here is the RPC fallback loop: try each endpoint in
//! order, first success wins, the last failure propagates.

use alloy::primitives::Address;
use arb_types::{Quote, TakeOrder};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error)]
pub enum QuoteError {
	#[error("Quote RPC call failed: {0}")]
	Rpc(String),
	#[error("Order could not be quoted: {0}")]
	Order(String),
	#[error("No RPC endpoints configured")]
	NoEndpoints,
}

/// Per-order quote outcome within one batch call.
pub type QuoteResult = Result<Quote, QuoteError>;

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Quote a batch of take-orders against one RPC endpoint, optionally
	/// pinned to a block. One result per order, in order.
	async fn quote(
		&self,
		orderbook: Address,
		orders: &[TakeOrder],
		rpc_url: &str,
		block_number: Option<u64>,
	) -> Result<Vec<QuoteResult>, QuoteError>;
}

/// Quote a single take-order across an ordered RPC fallback list.
pub async fn quote_single_with_fallback(
	service: &dyn QuoteService,
	orderbook: Address,
	order: &TakeOrder,
	rpc_urls: &[String],
	block_number: Option<u64>,
) -> Result<Quote, QuoteError> {
	let mut last_err = QuoteError::NoEndpoints;
	for rpc_url in rpc_urls {
		match service
			.quote(orderbook, std::slice::from_ref(order), rpc_url, block_number)
			.await
		{
			Ok(results) => match results.into_iter().next() {
				Some(Ok(quote)) => return Ok(quote),
				Some(Err(e)) => last_err = e,
				None => last_err = QuoteError::Rpc("empty quote response".to_string()),
			},
			Err(e) => {
				debug!(rpc = %rpc_url, error = %e, "Quote endpoint failed, trying next");
				last_err = e;
			}
		}
	}
	Err(last_err)
}

//! The opportunity-finding and transaction-execution pipeline.
//!
//! Data flows top-down: the batch orchestrator ([`round`]) iterates order
//! pairs and hands each to the pair processor ([`pair`]), which sequences
//! quoting, pricing, opportunity search and settlement. The search itself
//! is the multi-mode retrier ([`retrier`]) fanning out fixed-depth binary
//! searches ([`find_opp`]) over the dryrun prober ([`dryrun`]), grounded in
//! the pure profit arithmetic of [`profit`].

pub mod account;
pub mod contract;
pub mod diag;
pub mod dryrun;
pub mod find_opp;
pub mod pair;
pub mod profit;
pub mod retrier;
pub mod round;
pub mod settlement;

#[cfg(test)]
pub(crate) mod testutil;

pub use account::{Account, RoundRobin};
pub use contract::ArbContract;
pub use diag::Scrubber;
pub use dryrun::{DryrunProber, EthPrices};

use arb_chain::ChainClient;
use arb_config::BotConfig;
use arb_liquidity::LiquiditySource;
use arb_quote::QuoteService;
use std::sync::Arc;

/// Everything the pipeline consumes: configuration plus the narrow
/// collaborator interfaces. Construction of the concrete collaborators is
/// the embedder's business.
pub struct BotEnv {
	pub config: BotConfig,
	pub chain: Arc<dyn ChainClient>,
	/// Optional separate submission path (e.g. a private relay); reads
	/// and estimation always go through `chain`.
	pub submit_chain: Option<Arc<dyn ChainClient>>,
	pub liquidity: Arc<dyn LiquiditySource>,
	pub quoter: Arc<dyn QuoteService>,
	pub contract: Arc<dyn ArbContract>,
	pub scrubber: Scrubber,
}

impl BotEnv {
	/// The client used for transaction submission.
	pub fn submitter(&self) -> &dyn ChainClient {
		match &self.submit_chain {
			Some(relay) => relay.as_ref(),
			None => self.chain.as_ref(),
		}
	}
}

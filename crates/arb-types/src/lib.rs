//! Shared data model for the orderbook arbitrage bot.
//!
//! Everything that crosses a crate boundary lives here: orders and their
//! quotes, bundled pair objects, dryrun/processing results, the failure
//! taxonomy, span attribute bundles and the 18-decimal fixed-point helpers.

pub mod failure;
pub mod math;
pub mod order;
pub mod pair;
pub mod report;
pub mod span;
pub mod strategy;

pub use failure::{DryrunFailure, FailureReason, HaltReason, PairHalt};
pub use order::{CounterpartySource, Evaluable, IoDescriptor, Order, Quote, TakeOrder};
pub use pair::{BundledOrders, OrderPairObject, TokenDetails};
pub use report::{DryrunSuccess, ProcessPairReport, ProcessPairStatus, RoundReport};
pub use span::SpanAttributes;
pub use strategy::BundlingStrategy;

// Commonly used ethereum primitives, re-exported so downstream crates
// don't each need to reach into alloy for them.
pub use alloy::primitives::{Address, Bytes, B256, U256};
pub use alloy::rpc::types::TransactionRequest;

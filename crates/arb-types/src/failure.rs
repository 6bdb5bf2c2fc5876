//! Failure taxonomy.
//!
//! Three layers, matching how far an error is allowed to travel:
//! - [`FailureReason`]: recoverable inside the opportunity search, never
//!   surfaces past the pair processor;
//! - [`HaltReason`] / [`PairHalt`]: fatal for one pair in one round, caught
//!   by the batch orchestrator and turned into a report entry;
//! - terminal non-error outcomes live on the report status instead.

use crate::report::ProcessPairReport;
use crate::span::SpanAttributes;
use serde::Serialize;
use thiserror::Error;

/// Why a dryrun or opportunity search came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
	/// The signer cannot fund gas at all. Short-circuits every
	/// aggregation layer; retrying cannot fix it.
	NoWalletFund,
	/// The liquidity source has no route for the pair.
	NoRoute,
	/// Route exists but the fill is not profitable at this size.
	NoOpportunity,
}

impl std::fmt::Display for FailureReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FailureReason::NoWalletFund => write!(f, "no-wallet-fund"),
			FailureReason::NoRoute => write!(f, "no-route"),
			FailureReason::NoOpportunity => write!(f, "no-opportunity"),
		}
	}
}

/// A failed dryrun (or whole search), with the diagnostics every failure
/// path is required to carry.
#[derive(Debug, Clone, Error)]
#[error("dryrun failed: {reason}")]
pub struct DryrunFailure {
	pub reason: FailureReason,
	pub span_attributes: SpanAttributes,
}

impl DryrunFailure {
	pub fn new(reason: FailureReason) -> Self {
		Self {
			reason,
			span_attributes: SpanAttributes::new(),
		}
	}

	pub fn with_attributes(reason: FailureReason, span_attributes: SpanAttributes) -> Self {
		Self {
			reason,
			span_attributes,
		}
	}
}

/// Why the pair processor had to stop before reaching a terminal report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HaltReason {
	FailedToQuote,
	FailedToGetGasPrice,
	/// Routine for thinly traded tokens; reported at non-error severity.
	FailedToGetEthPrice,
	FailedToGetPools,
	TxFailed,
	TxMineFailed,
	UnexpectedError,
}

impl HaltReason {
	/// Whether this halt is an operational fault or routine scan noise.
	pub fn is_operational_fault(&self) -> bool {
		!matches!(self, HaltReason::FailedToGetEthPrice)
	}
}

impl std::fmt::Display for HaltReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			HaltReason::FailedToQuote => "failed-to-quote",
			HaltReason::FailedToGetGasPrice => "failed-to-get-gas-price",
			HaltReason::FailedToGetEthPrice => "failed-to-get-eth-price",
			HaltReason::FailedToGetPools => "failed-to-get-pools",
			HaltReason::TxFailed => "tx-failed",
			HaltReason::TxMineFailed => "tx-mine-failed",
			HaltReason::UnexpectedError => "unexpected-error",
		};
		write!(f, "{}", s)
	}
}

/// A structured halt from the pair processor. Always carries the (possibly
/// partial) report and span attributes; the caller owns severity and retry
/// policy.
#[derive(Debug, Clone, Error)]
#[error("pair processing halted: {reason}")]
pub struct PairHalt {
	pub reason: HaltReason,
	/// Serialized (and scrubbed) underlying error, when there is one.
	pub error: Option<String>,
	pub report: ProcessPairReport,
	pub span_attributes: SpanAttributes,
}
